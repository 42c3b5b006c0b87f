//! Configuration module
//!
//! A TOML file with optional `[analyzer]`, `[lexicon]` and `[output]`
//! sections. Command-line flags take precedence over file values.
//!
//! ```toml
//! [analyzer]
//! juman = ["jumanpp"]
//! knp = ["knp", "-tab"]
//! timeout_secs = 30
//!
//! [lexicon]
//! path = "my-lexicon.toml"
//!
//! [output]
//! pretty_json = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use ishi_core::{AnalyzerConfig, ClassifierConfig};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// External analyzer configuration
    #[serde(default)]
    pub analyzer: AnalyzerSection,

    /// Lexicon configuration
    #[serde(default)]
    pub lexicon: LexiconSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analyzer-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerSection {
    /// Morphological analyzer command line
    pub juman: Vec<String>,

    /// Dependency parser command line
    pub knp: Vec<String>,

    /// Wall-clock limit per sentence, in seconds
    pub timeout_secs: u64,
}

impl Default for AnalyzerSection {
    fn default() -> Self {
        let defaults = AnalyzerConfig::default();
        Self {
            juman: defaults.juman,
            knp: defaults.knp,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

/// Lexicon-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LexiconSection {
    /// Replacement lexicon file; the bundled lexicon when absent
    pub path: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Override the analyzer timeout
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        if let Some(secs) = timeout_secs {
            self.analyzer.timeout_secs = secs;
        }
        self
    }

    /// Override the lexicon file
    pub fn with_lexicon(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.lexicon.path = path;
        }
        self
    }

    /// Build the core classifier configuration
    pub fn classifier_config(&self) -> Result<ClassifierConfig> {
        let mut builder = ClassifierConfig::builder()
            .juman_command(self.analyzer.juman.iter().cloned())
            .knp_command(self.analyzer.knp.iter().cloned())
            .timeout(Duration::from_secs(self.analyzer.timeout_secs));

        if let Some(path) = &self.lexicon.path {
            builder = builder.lexicon_file(path);
        }

        builder
            .build()
            .map_err(|msg| CliError::ConfigError(msg).into())
    }
}
