//! Ordered rule cascade deciding volition
//!
//! Volition is a marked category: a predicate is volitional only when it is a
//! verb free of every disqualifying marker. The cascade therefore lists the
//! disqualifiers first, strongest evidence first, and ends with a negative
//! default. Evaluation stops at the first rule whose guard holds.
//!
//! | # | rule | verdict |
//! |---|------|---------|
//! | 1 | adjective predicate | `false` |
//! | 2 | potential form | `false` |
//! | 3 | non-volition idiom | `false` |
//! | 4 | linking verb (copula) | `false` |
//! | 5 | passive voice | `false` |
//! | 6 | non-volitional suffix | `false` |
//! | 7 | verb | `true` |
//! | 8 | default | `false` |

use crate::features::{Features, PosCategory};
use crate::lexicon::Lexicon;

/// One guard/verdict pair of the cascade
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    guard: fn(&Features, &Lexicon) -> bool,
    pub verdict: bool,
}

impl Rule {
    /// Whether this rule fires for the given features
    pub fn applies(&self, features: &Features, lexicon: &Lexicon) -> bool {
        (self.guard)(features, lexicon)
    }
}

/// The cascade, in evaluation order
pub static RULES: [Rule; 8] = [
    Rule {
        name: "adjective",
        guard: is_adjective,
        verdict: false,
    },
    Rule {
        name: "potential-form",
        guard: is_potential,
        verdict: false,
    },
    Rule {
        name: "non-volition-idiom",
        guard: is_idiom,
        verdict: false,
    },
    Rule {
        name: "linking-verb",
        guard: is_linking,
        verdict: false,
    },
    Rule {
        name: "passive-voice",
        guard: is_passive,
        verdict: false,
    },
    Rule {
        name: "non-volition-suffix",
        guard: has_non_volition_suffix,
        verdict: false,
    },
    Rule {
        name: "volitional-verb",
        guard: is_verb,
        verdict: true,
    },
    Rule {
        name: "default",
        guard: always,
        verdict: false,
    },
];

fn is_adjective(features: &Features, _: &Lexicon) -> bool {
    features.pos_category == PosCategory::Adjective
}

fn is_potential(features: &Features, _: &Lexicon) -> bool {
    features.is_potential_form
}

fn is_idiom(features: &Features, lexicon: &Lexicon) -> bool {
    lexicon.is_idiom(&features.surface_lexeme)
        || (!features.attached_auxiliaries.is_empty()
            && lexicon.is_idiom(&features.lexeme_with_auxiliaries()))
}

fn is_linking(features: &Features, _: &Lexicon) -> bool {
    features.is_linking_verb
}

fn is_passive(features: &Features, _: &Lexicon) -> bool {
    features.is_passive_voice
}

fn has_non_volition_suffix(features: &Features, lexicon: &Lexicon) -> bool {
    // A command is volitional whatever it is built from (考えて下さい)
    if features.is_imperative() {
        return false;
    }
    // Only morphemes after the head count: 通り過ぎる is a verb of its own
    features
        .attached_auxiliaries
        .iter()
        .any(|aux| lexicon.is_non_volition_suffix(aux))
}

fn is_verb(features: &Features, _: &Lexicon) -> bool {
    features.pos_category == PosCategory::Verb
}

fn always(_: &Features, _: &Lexicon) -> bool {
    true
}

/// Applies [`RULES`] against a borrowed lexicon
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> RuleEngine<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    /// First rule of the cascade that fires
    pub fn evaluate(&self, features: &Features) -> &'static Rule {
        let default = &RULES[RULES.len() - 1];
        RULES
            .iter()
            .find(|rule| rule.applies(features, self.lexicon))
            .unwrap_or(default)
    }

    /// Volition verdict
    pub fn decide(&self, features: &Features) -> bool {
        let rule = self.evaluate(features);
        tracing::debug!(
            rule = rule.name,
            verdict = rule.verdict,
            lexeme = %features.surface_lexeme,
            "rule fired"
        );
        rule.verdict
    }
}
