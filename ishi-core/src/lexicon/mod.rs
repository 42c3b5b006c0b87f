//! Word lists consulted by feature extraction and the rule cascade
//!
//! The lexicon is data-driven: categories are read from a TOML resource
//! (bundled at compile time, or supplied by the caller) and compiled into
//! lookup tables once. After construction a [`Lexicon`] is immutable, so a
//! single instance can be shared by reference across threads.
//!
//! # Usage
//!
//! ```rust
//! use ishi_core::Lexicon;
//!
//! let lexicon = Lexicon::bundled().unwrap();
//! assert!(lexicon.is_idiom("びっくりする"));
//! assert!(lexicon.linking().matches_lemma("だ"));
//! ```

pub(crate) mod config;
mod table;

use std::path::Path;
use std::sync::OnceLock;

use crate::error::LexiconError;

pub use config::LexiconConfig;
pub use table::{AnnotationSet, WordSet};

/// Bundled lexicon resource
const BUNDLED_LEXICON: &str = include_str!("../../lexicon/default.toml");

static BUNDLED: OnceLock<Result<Lexicon, LexiconError>> = OnceLock::new();

/// Compiled tables for one lexicon category
#[derive(Debug, Clone, Default)]
pub struct Category {
    pos: WordSet,
    annotations: AnnotationSet,
    lemmas: WordSet,
    auxiliaries: WordSet,
    conjugation_types: WordSet,
}

impl Category {
    fn from_list(list: &config::WordList) -> Self {
        Self {
            pos: WordSet::new(list.pos.iter().cloned()),
            annotations: AnnotationSet::new(list.annotations.iter().cloned()),
            lemmas: WordSet::new(list.lemmas.iter().cloned()),
            auxiliaries: WordSet::new(list.auxiliaries.iter().cloned()),
            conjugation_types: WordSet::new(list.conjugation_types.iter().cloned()),
        }
    }

    pub fn matches_pos(&self, pos: &str) -> bool {
        self.pos.contains(pos)
    }

    pub fn matches_annotation(&self, annotation: &str) -> bool {
        self.annotations.matches(annotation)
    }

    pub fn matches_any_annotation<'a>(
        &self,
        annotations: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        self.annotations.matches_any(annotations)
    }

    pub fn matches_lemma(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }

    pub fn matches_auxiliary(&self, auxiliary: &str) -> bool {
        self.auxiliaries.contains(auxiliary)
    }

    pub fn matches_conjugation_type(&self, conjugation_type: &str) -> bool {
        self.conjugation_types.contains(conjugation_type)
    }
}

/// Immutable lexicon shared by the feature extractor and the rule engine
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    adjective: Category,
    potential: Category,
    linking: Category,
    passive: Category,
    idioms: WordSet,
    suffixes: WordSet,
}

impl Lexicon {
    /// The lexicon compiled into the crate, loaded on first access
    pub fn bundled() -> Result<&'static Lexicon, LexiconError> {
        BUNDLED
            .get_or_init(|| Self::from_toml_str(BUNDLED_LEXICON))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Build from validated configuration
    pub fn from_config(config: &LexiconConfig) -> Result<Self, LexiconError> {
        config.validate().map_err(LexiconError::Invalid)?;

        Ok(Self {
            name: config.metadata.name.clone(),
            adjective: Category::from_list(&config.adjective),
            potential: Category::from_list(&config.potential),
            linking: Category::from_list(&config.linking),
            passive: Category::from_list(&config.passive),
            idioms: WordSet::new(config.non_volition.idioms.iter().cloned()),
            suffixes: WordSet::new(config.non_volition.suffixes.iter().cloned()),
        })
    }

    /// Parse a TOML lexicon document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LexiconError> {
        let config: LexiconConfig =
            toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;
        let lexicon = Self::from_config(&config)?;

        tracing::debug!(
            name = %lexicon.name,
            idioms = lexicon.idioms.len(),
            suffixes = lexicon.suffixes.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Load a TOML lexicon file, replacing the bundled lists entirely
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adjective(&self) -> &Category {
        &self.adjective
    }

    pub fn potential(&self) -> &Category {
        &self.potential
    }

    pub fn linking(&self) -> &Category {
        &self.linking
    }

    pub fn passive(&self) -> &Category {
        &self.passive
    }

    /// Exact match against the curated non-volition idioms
    pub fn is_idiom(&self, expression: &str) -> bool {
        self.idioms.contains(expression)
    }

    /// Exact match of one auxiliary against the non-volitional suffixes
    pub fn is_non_volition_suffix(&self, auxiliary: &str) -> bool {
        self.suffixes.contains(auxiliary)
    }
}
