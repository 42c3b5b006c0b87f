//! Feature extraction from a predicate unit
//!
//! Turns the analyzer's view of the governing tag into the flat record the
//! rule cascade reads. Extraction never fails: missing or unknown data maps
//! to empty strings and [`PosCategory::Other`].

use crate::analysis::{Morpheme, PredicateUnit};
use crate::lexicon::Lexicon;

/// Tag annotation carrying the predicate type (`用言:動` etc.)
const PREDICATE_TYPE: &str = "用言";
const VERB_POS: &str = "動詞";
const NOUN_POS: &str = "名詞";
const IMPERATIVE_FORM: &str = "命令形";
const ATTACHED_FEATURE: &str = "付属";
/// Parts of speech that never head a predicate unit
const FUNCTION_POS: [&str; 5] = ["助詞", "助動詞", "判定詞", "接尾辞", "特殊"];
/// Punctuation and symbols
const SPECIAL_POS: &str = "特殊";

/// Coarse part of speech of the predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosCategory {
    Verb,
    Adjective,
    /// Noun or copula-headed predicate
    NounPredicate,
    Other,
}

impl PosCategory {
    fn from_predicate_type(value: &str) -> Option<Self> {
        match value {
            "動" => Some(PosCategory::Verb),
            "形" => Some(PosCategory::Adjective),
            "判" => Some(PosCategory::NounPredicate),
            _ => None,
        }
    }
}

/// Normalized features of one predicate unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    /// Morphemes up to the head, head in its base form
    pub surface_lexeme: String,
    pub pos_category: PosCategory,
    pub conjugation_type: String,
    pub conjugation_form: String,
    pub is_potential_form: bool,
    pub is_linking_verb: bool,
    pub is_passive_voice: bool,
    /// Base forms of the morphemes after the head, in analyzer order
    pub attached_auxiliaries: Vec<String>,
}

impl Features {
    /// Record for a bare verb with no markers set
    pub fn verb(lexeme: impl Into<String>) -> Self {
        Self {
            surface_lexeme: lexeme.into(),
            pos_category: PosCategory::Verb,
            conjugation_type: String::new(),
            conjugation_form: String::new(),
            is_potential_form: false,
            is_linking_verb: false,
            is_passive_voice: false,
            attached_auxiliaries: Vec::new(),
        }
    }

    /// Lexeme followed by its auxiliaries
    pub fn lexeme_with_auxiliaries(&self) -> String {
        let mut chain = self.surface_lexeme.clone();
        for auxiliary in &self.attached_auxiliaries {
            chain.push_str(auxiliary);
        }
        chain
    }

    pub fn is_imperative(&self) -> bool {
        self.conjugation_form.starts_with(IMPERATIVE_FORM)
    }
}

/// Extracts [`Features`] using a borrowed lexicon
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> FeatureExtractor<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, unit: &PredicateUnit<'_>) -> Features {
        let morphemes = unit.morphemes();
        let tag_features = unit.features();

        let head_index = head_index(morphemes);
        let head = head_index.map(|i| &morphemes[i]);
        let auxiliaries: Vec<&Morpheme> = head_index
            .map(|i| &morphemes[i + 1..])
            .unwrap_or_default()
            .iter()
            .filter(|m| m.pos != SPECIAL_POS)
            .collect();

        let surface_lexeme = head_index
            .map(|i| {
                let mut lexeme: String =
                    morphemes[..i].iter().map(|m| m.surface.as_str()).collect();
                lexeme.push_str(&morphemes[i].lemma);
                lexeme
            })
            .unwrap_or_default();

        let conjugating = morphemes.iter().rev().find(|m| m.conjugates()).or(head);
        let (conjugation_type, conjugation_form) = conjugating
            .map(|m| (m.conjugation_type.clone(), m.conjugation_form.clone()))
            .unwrap_or_default();

        let tag_annotations = || tag_features.iter().map(String::as_str);
        let unit_annotations = || {
            head.into_iter()
                .chain(auxiliaries.iter().copied())
                .flat_map(|m| m.annotations())
        };

        let potential = self.lexicon.potential();
        let is_potential_form = potential.matches_any_annotation(tag_annotations())
            || potential.matches_any_annotation(unit_annotations())
            || potential.matches_conjugation_type(&conjugation_type)
            || head
                .into_iter()
                .chain(auxiliaries.iter().copied())
                .any(|m| potential.matches_lemma(&m.lemma))
            || auxiliaries.iter().any(|m| potential.matches_auxiliary(&m.lemma));

        let linking = self.lexicon.linking();
        let is_linking_verb = morphemes
            .iter()
            .any(|m| linking.matches_pos(&m.pos) || linking.matches_lemma(&m.lemma));

        let passive = self.lexicon.passive();
        let is_passive_voice = passive.matches_any_annotation(tag_annotations())
            || auxiliaries.iter().any(|m| passive.matches_auxiliary(&m.lemma));

        let features = Features {
            surface_lexeme,
            pos_category: self.pos_category(tag_features, head),
            conjugation_type,
            conjugation_form,
            is_potential_form,
            is_linking_verb,
            is_passive_voice,
            attached_auxiliaries: auxiliaries.iter().map(|m| m.lemma.clone()).collect(),
        };

        tracing::trace!(?features, surface = %unit.surface(), "extracted features");
        features
    }

    fn pos_category(&self, tag_features: &[String], head: Option<&Morpheme>) -> PosCategory {
        let annotated = tag_features.iter().find_map(|f| {
            f.strip_prefix(PREDICATE_TYPE)
                .and_then(|rest| rest.strip_prefix(':'))
                .and_then(PosCategory::from_predicate_type)
        });
        if let Some(category) = annotated {
            return category;
        }

        let adjective = self.lexicon.adjective();
        if adjective.matches_any_annotation(tag_features.iter().map(String::as_str)) {
            return PosCategory::Adjective;
        }

        match head {
            Some(m) if m.pos == VERB_POS => PosCategory::Verb,
            Some(m) if adjective.matches_pos(&m.pos) => PosCategory::Adjective,
            Some(m) if m.pos == NOUN_POS => PosCategory::NounPredicate,
            _ => PosCategory::Other,
        }
    }
}

fn is_content(morpheme: &Morpheme) -> bool {
    !morpheme.has_feature(ATTACHED_FEATURE) && !FUNCTION_POS.contains(&morpheme.pos.as_str())
}

/// Last content morpheme, or the first morpheme when there is none
fn head_index(morphemes: &[Morpheme]) -> Option<usize> {
    if morphemes.is_empty() {
        return None;
    }
    Some(morphemes.iter().rposition(is_content).unwrap_or(0))
}
