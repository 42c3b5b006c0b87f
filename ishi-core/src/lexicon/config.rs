//! Lexicon resource schema
//!
//! This module defines the TOML schema for the word lists that drive
//! feature extraction and the rule cascade.

use serde::{Deserialize, Serialize};

/// Root lexicon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub adjective: WordList,
    #[serde(default)]
    pub potential: WordList,
    #[serde(default)]
    pub linking: WordList,
    #[serde(default)]
    pub passive: WordList,
    #[serde(default)]
    pub non_volition: NonVolition,
}

/// Lexicon metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Word lists for one category, split by the analyzer field they match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordList {
    /// Parts of speech
    #[serde(default)]
    pub pos: Vec<String>,
    /// Tag or morpheme annotations (matched by key)
    #[serde(default)]
    pub annotations: Vec<String>,
    /// Base forms of the head morpheme or any morpheme in the unit
    #[serde(default)]
    pub lemmas: Vec<String>,
    /// Base forms of attached auxiliaries
    #[serde(default)]
    pub auxiliaries: Vec<String>,
    /// Conjugation types
    #[serde(default)]
    pub conjugation_types: Vec<String>,
}

impl WordList {
    fn entries(&self) -> impl Iterator<Item = &String> {
        self.pos
            .iter()
            .chain(&self.annotations)
            .chain(&self.lemmas)
            .chain(&self.auxiliaries)
            .chain(&self.conjugation_types)
    }
}

/// Curated non-volitional expressions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NonVolition {
    /// Whole-lexeme idioms, matched exactly
    #[serde(default)]
    pub idioms: Vec<String>,
    /// Auxiliary suffixes that strip volition from the predicate
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl LexiconConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.name.trim().is_empty() {
            return Err("Lexicon name must not be empty".to_string());
        }

        let sections = [
            ("adjective", &self.adjective),
            ("potential", &self.potential),
            ("linking", &self.linking),
            ("passive", &self.passive),
        ];
        for (section, list) in sections {
            if list.entries().any(|e| e.trim().is_empty()) {
                return Err(format!("Empty entry in [{section}]"));
            }
        }

        let non_volition = self
            .non_volition
            .idioms
            .iter()
            .chain(&self.non_volition.suffixes);
        for entry in non_volition {
            if entry.trim().is_empty() {
                return Err("Empty entry in [non_volition]".to_string());
            }
            if entry.trim() != entry {
                return Err(format!("Entry with surrounding whitespace: {entry:?}"));
            }
        }

        Ok(())
    }
}
