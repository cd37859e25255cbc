use anyhow::Context;
use clap::Parser;
use weather_odds::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("weather-odds failed")
}
