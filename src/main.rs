use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    turnloop::cli::run_cli().await
}
