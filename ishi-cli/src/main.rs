//! `ishi`: classify Japanese sentences as volitional or not

use clap::Parser;
use ishi_cli::commands::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().execute()
}
