//! Layered error types
//!
//! Each layer owns its error enum: analyzer plumbing, lexicon loading,
//! input normalization and the classification entry point.

use std::time::Duration;
use thiserror::Error;

/// Malformed analyzer output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed KNP output at line {line}: {reason}")]
pub struct FormatError {
    /// 1-based line number within the parsed block
    pub line: usize,
    /// What was wrong with the line
    pub reason: String,
}

impl FormatError {
    pub(crate) fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the external morphological/dependency analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The analyzer process could not be started
    #[error("failed to start analyzer `{command}`: {source}")]
    Spawn {
        /// Program that failed to start
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while talking to the analyzer
    #[error("analyzer I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The analyzer did not finish within the configured wall-clock limit
    #[error("analyzer timed out after {0:?}")]
    Timeout(Duration),

    /// The analyzer exited unsuccessfully
    #[error("analyzer exited with status {status}: {stderr}")]
    Failed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The analyzer produced bytes that are not UTF-8
    #[error("analyzer output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The analyzer output could not be parsed
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors raised while loading the lexicon resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// The TOML document could not be deserialized
    #[error("failed to parse lexicon: {0}")]
    Parse(String),

    /// The lexicon file could not be read
    #[error("failed to read lexicon {path}: {reason}")]
    Io {
        /// File that was requested
        path: String,
        /// OS error message
        reason: String,
    },

    /// The lexicon parsed but violates a structural requirement
    #[error("invalid lexicon: {0}")]
    Invalid(String),
}

/// Errors raised while normalizing classifier input
#[derive(Error, Debug)]
pub enum InputError {
    /// Raw text was empty or whitespace only
    #[error("input text is empty")]
    EmptyText,

    /// The analyzer failed on raw text input
    #[error("analysis failed: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// The analyzer returned a sentence without any basic phrase
    #[error("analyzer returned an empty structure")]
    EmptyAnalysis,
}

/// Errors surfaced by [`crate::Classifier::classify`]
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The input could not be turned into a parsed sentence
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// No governing predicate was found, so no verdict can be computed
    #[error("no governing predicate found in sentence")]
    PredicateNotFound,

    /// The process-wide lexicon failed to load
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

impl From<AnalyzerError> for ClassifyError {
    fn from(err: AnalyzerError) -> Self {
        ClassifyError::Input(InputError::Analyzer(err))
    }
}

/// Result type for classification
pub type Result<T> = std::result::Result<T, ClassifyError>;
