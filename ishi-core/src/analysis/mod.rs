//! Analyzer result model
//!
//! The external analyzer's native output is wrapped in a small owned model
//! that exposes exactly what the classifier reads: morphemes with their
//! part of speech, conjugation and annotations, grouped into basic phrases
//! (tags) that carry dependency and predicate annotations.

pub mod command;
pub mod knp;

use crate::error::AnalyzerError;

pub use command::KnpCommand;

/// Field value used by Juman/KNP for "not applicable"
pub const NOT_APPLICABLE: &str = "*";

/// One morpheme as reported by the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    pub reading: String,
    /// Base (dictionary) form
    pub lemma: String,
    pub pos: String,
    pub subpos: String,
    pub conjugation_type: String,
    pub conjugation_form: String,
    /// Semantic information entries, e.g. `代表表記:学べる/まなべる`
    pub semantics: Vec<String>,
    /// Feature annotations without angle brackets, e.g. `自立`
    pub features: Vec<String>,
}

impl Morpheme {
    /// Minimal morpheme with `*` in every optional field
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>, pos: impl Into<String>) -> Self {
        let surface = surface.into();
        Self {
            reading: surface.clone(),
            surface,
            lemma: lemma.into(),
            pos: pos.into(),
            subpos: NOT_APPLICABLE.to_string(),
            conjugation_type: NOT_APPLICABLE.to_string(),
            conjugation_form: NOT_APPLICABLE.to_string(),
            semantics: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn with_subpos(mut self, subpos: impl Into<String>) -> Self {
        self.subpos = subpos.into();
        self
    }

    pub fn with_conjugation(
        mut self,
        conjugation_type: impl Into<String>,
        conjugation_form: impl Into<String>,
    ) -> Self {
        self.conjugation_type = conjugation_type.into();
        self.conjugation_form = conjugation_form.into();
        self
    }

    pub fn with_semantics(mut self, entry: impl Into<String>) -> Self {
        self.semantics.push(entry.into());
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Whether the morpheme inflects
    pub fn conjugates(&self) -> bool {
        self.conjugation_type != NOT_APPLICABLE
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Semantic entries followed by feature annotations
    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.semantics
            .iter()
            .chain(&self.features)
            .map(String::as_str)
    }
}

/// Dependency relation of a basic phrase to its head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    /// Ordinary dependency
    Dependent,
    /// Parallel (coordination)
    Parallel,
    /// Appositive
    Appositive,
    /// Partial parallel
    Partial,
}

impl DependencyType {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'D' => Some(DependencyType::Dependent),
            'P' => Some(DependencyType::Parallel),
            'A' => Some(DependencyType::Appositive),
            'I' => Some(DependencyType::Partial),
            _ => None,
        }
    }
}

/// One basic phrase (KNP tag)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Index of the head tag, `None` for the sentence root
    pub head: Option<usize>,
    pub dependency: DependencyType,
    /// Feature annotations without angle brackets, e.g. `用言:動`
    pub features: Vec<String>,
    pub morphemes: Vec<Morpheme>,
}

impl Tag {
    pub fn new(morphemes: Vec<Morpheme>) -> Self {
        Self {
            head: None,
            dependency: DependencyType::Dependent,
            features: Vec::new(),
            morphemes,
        }
    }

    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Concatenated surface of all morphemes
    pub fn surface(&self) -> String {
        self.morphemes.iter().map(|m| m.surface.as_str()).collect()
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Value of a `key:value` annotation
    pub fn feature_value(&self, key: &str) -> Option<&str> {
        self.features
            .iter()
            .find_map(|f| f.strip_prefix(key).and_then(|rest| rest.strip_prefix(':')))
    }

    /// Whether the tag is marked as a predicate (`用言` or `用言:*`)
    pub fn is_predicate(&self) -> bool {
        self.has_feature(PREDICATE_FEATURE) || self.feature_value(PREDICATE_FEATURE).is_some()
    }
}

/// Predicate annotation key
pub const PREDICATE_FEATURE: &str = "用言";

/// Analyzer output for one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSentence {
    /// Sentence id line (`# S-ID:...`) without the leading `# `
    pub comment: Option<String>,
    pub tags: Vec<Tag>,
}

impl ParsedSentence {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self {
            comment: None,
            tags,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Reconstructed surface text
    pub fn surface(&self) -> String {
        self.tags.iter().map(Tag::surface).collect()
    }
}

/// Read-only view of the tag that governs the sentence
///
/// Borrowed from a [`ParsedSentence`] by the predicate locator, or built
/// directly from a standalone [`Tag`] when the caller already isolated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateUnit<'a> {
    tag: &'a Tag,
}

impl<'a> PredicateUnit<'a> {
    pub fn new(tag: &'a Tag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> &'a Tag {
        self.tag
    }

    pub fn morphemes(&self) -> &'a [Morpheme] {
        &self.tag.morphemes
    }

    pub fn features(&self) -> &'a [String] {
        &self.tag.features
    }

    pub fn surface(&self) -> String {
        self.tag.surface()
    }
}

impl<'a> From<&'a Tag> for PredicateUnit<'a> {
    fn from(tag: &'a Tag) -> Self {
        PredicateUnit::new(tag)
    }
}

/// Morphological and dependency analyzer
///
/// The classifier calls `analyze` at most once per raw-text input.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Result<ParsedSentence, AnalyzerError>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Result<ParsedSentence, AnalyzerError>,
{
    fn analyze(&self, text: &str) -> Result<ParsedSentence, AnalyzerError> {
        self(text)
    }
}
