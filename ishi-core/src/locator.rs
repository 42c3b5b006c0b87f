//! Locating the governing predicate
//!
//! Japanese predicates are clause-final, so the rightmost tag marked as a
//! predicate governs the sentence.

use crate::analysis::{ParsedSentence, PredicateUnit};

/// Find the sentence-final predicate, scanning tags from the end
///
/// `None` means no verdict can be computed for the sentence; it is not a
/// negative verdict.
pub fn locate_predicate(sentence: &ParsedSentence) -> Option<PredicateUnit<'_>> {
    let found = sentence
        .tags()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, tag)| tag.is_predicate());

    match found {
        Some((index, tag)) => {
            tracing::debug!(index, surface = %tag.surface(), "located predicate");
            Some(PredicateUnit::new(tag))
        }
        None => {
            tracing::debug!(tags = sentence.tags().len(), "no predicate tag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Morpheme, Tag};

    fn noun(surface: &str) -> Tag {
        Tag::new(vec![Morpheme::new(surface, surface, "名詞")]).with_feature("体言")
    }

    fn verb(surface: &str) -> Tag {
        Tag::new(vec![Morpheme::new(surface, surface, "動詞")]).with_feature("用言:動")
    }

    #[test]
    fn test_final_predicate_wins() {
        let sentence = ParsedSentence::new(vec![
            noun("勉強を").with_head(1),
            verb("始めて").with_head(2),
            verb("びっくりした"),
        ]);

        let unit = locate_predicate(&sentence).unwrap();
        assert_eq!(unit.surface(), "びっくりした");
        assert!(std::ptr::eq(unit.tag(), &sentence.tags()[2]));
    }

    #[test]
    fn test_trailing_non_predicate_is_skipped() {
        let sentence = ParsedSentence::new(vec![verb("走る").with_head(1), noun("こと")]);

        let unit = locate_predicate(&sentence).unwrap();
        assert_eq!(unit.surface(), "走る");
    }

    #[test]
    fn test_no_predicate() {
        let sentence = ParsedSentence::new(vec![noun("花火")]);
        assert!(locate_predicate(&sentence).is_none());
    }

    #[test]
    fn test_empty_sentence() {
        assert!(locate_predicate(&ParsedSentence::default()).is_none());
    }

    #[test]
    fn test_bare_predicate_feature() {
        let tag = Tag::new(vec![Morpheme::new("静か", "静かだ", "形容詞")]).with_feature("用言");
        let sentence = ParsedSentence::new(vec![tag]);
        assert!(locate_predicate(&sentence).is_some());
    }
}
