//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input file matched the given patterns
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Classification of one input failed
    ClassificationError {
        /// The sentence, or the surface of the parsed sentence
        input: String,
        /// Underlying reason
        reason: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ClassificationError { input, reason } => {
                write!(f, "Failed to classify `{input}`: {reason}")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
