use anyhow::Result;
use clap::Parser;
use weather_buddy::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weather_buddy::run(cli).await
}
