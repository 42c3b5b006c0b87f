//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output the verdict for one input
    fn format_verdict(&mut self, input: &str, volition: bool) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `True` or `False`, one line per input
    Text,
    /// JSON array of `{ "input": ..., "volition": ... }` objects
    Json,
}
