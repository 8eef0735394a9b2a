use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::TableConfig;
use crate::core::thinking::ThinkTime;
use crate::engine::{simulate, TableEngine};

#[derive(Parser)]
#[command(name = "turnloop")]
#[command(about = "Turn rotation table with thinking bots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play interactively in the terminal (default)
    Play,
    /// Run rounds headlessly, ending each turn as soon as it is allowed
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value_t = 1)]
        rounds: u32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Seats as "Name:kind,..." where kind is human or computer
    #[arg(long, global = true)]
    pub roster: Option<String>,

    /// JSON roster file: [{"name": "...", "kind": "human|computer"}]
    #[arg(long, global = true)]
    pub roster_file: Option<PathBuf>,

    /// Shortest bot think time in seconds
    #[arg(long, global = true, default_value_t = ThinkTime::DEFAULT_MIN_SECS)]
    pub min_think: u64,

    /// Longest bot think time in seconds
    #[arg(long, global = true, default_value_t = ThinkTime::DEFAULT_MAX_SECS)]
    pub max_think: u64,

    /// Host loop tick in milliseconds
    #[arg(long, global = true, default_value_t = 16)]
    pub tick_ms: u64,

    /// Write logs here (play mode discards logs otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = TableConfig::from_cli(&cli.table)?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            init_logging(cli.table.log_file.as_ref(), false)?;
            TableEngine::new(config).run(ratatui::init()).await
        }
        Commands::Simulate { rounds } => {
            init_logging(cli.table.log_file.as_ref(), true)?;
            simulate(&config, rounds).await?;
            Ok(())
        }
    }
}

/// The terminal UI owns stdout/stderr, so interactive play only logs to a file.
fn init_logging(log_file: Option<&PathBuf>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (log_file, to_stderr) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::stderr).init(),
        (None, false) => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}
