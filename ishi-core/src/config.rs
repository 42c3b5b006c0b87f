//! Classifier configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::LexiconError;
use crate::lexicon::Lexicon;

/// Default wall-clock limit for one analyzer invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Command lines for the external analyzer pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Morphological analyzer, reads raw text on stdin
    pub juman: Vec<String>,
    /// Dependency parser, reads the morphological analysis on stdin
    pub knp: Vec<String>,
    /// Limit for the whole pipeline
    pub timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            juman: vec!["jumanpp".to_string()],
            knp: vec!["knp".to_string(), "-tab".to_string()],
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AnalyzerConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.juman.first().map_or(true, |p| p.trim().is_empty()) {
            return Err("Morphological analyzer command is empty".to_string());
        }
        if self.knp.first().map_or(true, |p| p.trim().is_empty()) {
            return Err("Dependency parser command is empty".to_string());
        }
        if self.timeout.is_zero() {
            return Err("Analyzer timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Where the lexicon comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexiconSource {
    /// Lexicon compiled into the crate
    #[default]
    Bundled,
    /// TOML file that replaces the bundled lexicon entirely
    File(PathBuf),
}

/// Configuration for [`crate::Classifier`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub lexicon: LexiconSource,
    pub analyzer: AnalyzerConfig,
}

impl ClassifierConfig {
    /// Create a builder
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Load the configured lexicon
    ///
    /// The bundled lexicon is cloned out of the process-wide instance; callers
    /// that only need a shared reference should use [`Lexicon::bundled`].
    pub fn load_lexicon(&self) -> Result<Lexicon, LexiconError> {
        match &self.lexicon {
            LexiconSource::Bundled => Lexicon::bundled().cloned(),
            LexiconSource::File(path) => Lexicon::from_file(path),
        }
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ClassifierConfigBuilder {
    config: ClassifierConfig,
}

impl ClassifierConfigBuilder {
    /// Use a lexicon file instead of the bundled lexicon
    pub fn lexicon_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lexicon = LexiconSource::File(path.into());
        self
    }

    /// Set the morphological analyzer command line
    pub fn juman_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.analyzer.juman = command.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dependency parser command line
    pub fn knp_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.analyzer.knp = command.into_iter().map(Into::into).collect();
        self
    }

    /// Set the analyzer timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.analyzer.timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClassifierConfig, String> {
        self.config.analyzer.validate()?;
        Ok(self.config)
    }
}
