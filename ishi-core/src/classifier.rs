//! Input normalization and the classification entry point

use crate::analysis::{Analyzer, KnpCommand, ParsedSentence, PredicateUnit};
use crate::error::{ClassifyError, InputError, Result};
use crate::features::FeatureExtractor;
use crate::lexicon::Lexicon;
use crate::locator::locate_predicate;
use crate::rules::RuleEngine;

/// The three accepted input shapes
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// Raw sentence, analyzed by the configured analyzer
    Text(&'a str),
    /// Analyzer output for a whole sentence
    Sentence(&'a ParsedSentence),
    /// A predicate unit the caller already isolated
    Predicate(PredicateUnit<'a>),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text.as_str())
    }
}

impl<'a> From<&'a ParsedSentence> for Input<'a> {
    fn from(sentence: &'a ParsedSentence) -> Self {
        Input::Sentence(sentence)
    }
}

impl<'a> From<PredicateUnit<'a>> for Input<'a> {
    fn from(unit: PredicateUnit<'a>) -> Self {
        Input::Predicate(unit)
    }
}

/// Volition classifier
///
/// Holds a borrowed lexicon and an analyzer used for raw text. A classifier
/// carries no mutable state, so it can be shared across threads whenever the
/// analyzer can.
///
/// ```rust
/// use ishi_core::analysis::{Morpheme, ParsedSentence, Tag};
/// use ishi_core::{AnalyzerError, Classifier, Lexicon};
///
/// let analyzer = |_: &str| -> Result<ParsedSentence, AnalyzerError> {
///     Ok(ParsedSentence::new(vec![Tag::new(vec![
///         Morpheme::new("走る", "走る", "動詞").with_conjugation("子音動詞ラ行", "基本形"),
///     ])
///     .with_feature("用言:動")]))
/// };
///
/// let classifier = Classifier::new(Lexicon::bundled().unwrap(), analyzer);
/// assert!(classifier.classify("走る").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Classifier<'l, A> {
    lexicon: &'l Lexicon,
    analyzer: A,
}

impl<A: Analyzer> Classifier<'static, A> {
    /// Classifier over the bundled lexicon
    pub fn bundled(analyzer: A) -> Result<Self> {
        Ok(Self::new(Lexicon::bundled()?, analyzer))
    }
}

impl<'l, A: Analyzer> Classifier<'l, A> {
    pub fn new(lexicon: &'l Lexicon, analyzer: A) -> Self {
        Self { lexicon, analyzer }
    }

    pub fn lexicon(&self) -> &'l Lexicon {
        self.lexicon
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Decide whether the input expresses volition
    pub fn classify<'a>(&self, input: impl Into<Input<'a>>) -> Result<bool> {
        match input.into() {
            Input::Text(text) => {
                let sentence = self.analyze(text)?;
                self.classify_sentence(&sentence)
            }
            Input::Sentence(sentence) => self.classify_sentence(sentence),
            Input::Predicate(unit) => Ok(self.classify_predicate(unit)),
        }
    }

    /// Run the analyzer once on raw text
    pub fn analyze(&self, text: &str) -> std::result::Result<ParsedSentence, InputError> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyText);
        }

        let sentence = self.analyzer.analyze(text)?;
        if sentence.is_empty() {
            return Err(InputError::EmptyAnalysis);
        }
        Ok(sentence)
    }

    pub fn classify_sentence(&self, sentence: &ParsedSentence) -> Result<bool> {
        let unit = locate_predicate(sentence).ok_or(ClassifyError::PredicateNotFound)?;
        Ok(self.classify_predicate(unit))
    }

    pub fn classify_predicate(&self, unit: PredicateUnit<'_>) -> bool {
        let features = FeatureExtractor::new(self.lexicon).extract(&unit);
        RuleEngine::new(self.lexicon).decide(&features)
    }
}

/// Classify with the bundled lexicon and the default Juman++/KNP pipeline
pub fn classify<'a>(input: impl Into<Input<'a>>) -> Result<bool> {
    Classifier::bundled(KnpCommand::default())?.classify(input)
}
