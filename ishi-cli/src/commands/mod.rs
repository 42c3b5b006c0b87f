//! CLI command implementations

use anyhow::Result;
use clap::Parser;

pub mod classify;

/// Classify Japanese sentences as volitional or non-volitional
///
/// Reads one sentence per line from the given files, or from stdin when no
/// file is given, and prints one verdict per sentence.
#[derive(Debug, Parser)]
#[command(name = "ishi", version)]
pub struct Cli {
    #[command(flatten)]
    pub classify: classify::ClassifyArgs,
}

impl Cli {
    /// Execute the command line
    pub fn execute(&self) -> Result<()> {
        self.classify.execute()
    }
}
