//! Lookup tables backing the lexicon categories

use std::collections::HashSet;

/// Exact-match word set with a length window for early rejection
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String>,
    /// Minimum entry length in bytes
    min_length: usize,
    /// Maximum entry length in bytes
    max_length: usize,
}

impl WordSet {
    /// Build from a word list
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        let words: HashSet<String> = words.into_iter().collect();
        let min_length = words.iter().map(String::len).min().unwrap_or(0);
        let max_length = words.iter().map(String::len).max().unwrap_or(0);

        Self {
            words,
            min_length,
            max_length,
        }
    }

    /// Exact membership
    pub fn contains(&self, word: &str) -> bool {
        if word.len() < self.min_length || word.len() > self.max_length {
            return false;
        }

        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Annotation keys such as `可能動詞` or `態:受動`
///
/// An annotation matches an entry when it equals the entry or continues it
/// with a `:` value separator, so `可能動詞` matches `可能動詞:学ぶ/まなぶ`
/// but not `可能動詞候補`.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    keys: Vec<String>,
}

impl AnnotationSet {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        Self { keys }
    }

    pub fn matches(&self, annotation: &str) -> bool {
        self.keys.iter().any(|key| {
            annotation
                .strip_prefix(key.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
        })
    }

    pub fn matches_any<'a>(&self, annotations: impl IntoIterator<Item = &'a str>) -> bool {
        annotations.into_iter().any(|a| self.matches(a))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
