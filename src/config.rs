/// Resolved table configuration: who sits at the table and how long bots think
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::cli::TableArgs;
use crate::core::actor::{Actor, ActorKind};
use crate::core::thinking::ThinkTime;

/// One roster entry as written in a roster file or on the command line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub kind: ActorKind,
}

impl SeatConfig {
    pub fn to_actor(&self) -> Actor {
        Actor::new(self.name.clone(), self.kind)
    }
}

#[derive(Debug, Clone)]
pub struct TableConfig {
    pub seats: Vec<SeatConfig>,
    pub think_time: ThinkTime,
    pub tick: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: default_seats(),
            think_time: ThinkTime::default(),
            tick: Duration::from_millis(16),
        }
    }
}

impl TableConfig {
    pub fn from_cli(args: &TableArgs) -> Result<Self> {
        let seats = match (&args.roster_file, &args.roster) {
            (Some(_), Some(_)) => bail!("--roster and --roster-file are mutually exclusive"),
            (Some(path), None) => load_roster_file(path)?,
            (None, Some(spec)) => parse_roster(spec)?,
            (None, None) => default_seats(),
        };

        let think_time = ThinkTime::new(args.min_think, args.max_think)
            .context("bad --min-think/--max-think")?;
        ensure!(args.tick_ms > 0, "--tick-ms must be at least 1");

        Ok(Self {
            seats,
            think_time,
            tick: Duration::from_millis(args.tick_ms),
        })
    }

    /// A fresh set of actors for a new round
    pub fn actors(&self) -> Vec<Actor> {
        self.seats.iter().map(SeatConfig::to_actor).collect()
    }
}

fn default_seats() -> Vec<SeatConfig> {
    vec![
        SeatConfig { name: "Player1".into(), kind: ActorKind::Human },
        SeatConfig { name: "Bot".into(), kind: ActorKind::Computer },
        SeatConfig { name: "Dealer".into(), kind: ActorKind::Computer },
    ]
}

/// Parse `Name:kind,Name:kind`. A bare name is a human seat.
pub fn parse_roster(spec: &str) -> Result<Vec<SeatConfig>> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<SeatConfig> {
            let (name, kind) = match entry.rsplit_once(':') {
                Some((name, kind)) => (name.trim(), parse_kind(kind.trim())?),
                None => (entry, ActorKind::Human),
            };
            ensure!(!name.is_empty(), "roster entry '{}' has no name", entry);
            Ok(SeatConfig { name: name.to_string(), kind })
        })
        .collect()
}

fn parse_kind(kind: &str) -> Result<ActorKind> {
    match kind.to_ascii_lowercase().as_str() {
        "human" | "h" => Ok(ActorKind::Human),
        "computer" | "bot" | "c" => Ok(ActorKind::Computer),
        other => bail!("unknown actor kind '{}' (expected human or computer)", other),
    }
}

pub fn load_roster_file(path: &Path) -> Result<Vec<SeatConfig>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster file {}", path.display()))?;
    let seats: Vec<SeatConfig> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing roster file {}", path.display()))?;
    for seat in &seats {
        ensure!(!seat.name.trim().is_empty(), "roster file {} has an unnamed seat", path.display());
    }
    Ok(seats)
}
