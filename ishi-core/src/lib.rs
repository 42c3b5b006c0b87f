//! Volition classification for Japanese predicates
//!
//! Decides whether the governing predicate of a Japanese sentence expresses
//! a volitional act (something the subject does on purpose) or not. The
//! decision is a fixed, ordered cascade of linguistic rules over features
//! taken from Juman++/KNP dependency analysis.
//!
//! # Architecture
//!
//! The pipeline is split into layers:
//! - **Analysis**: the KNP data model, the `-tab` reader and the external
//!   Juman++/KNP process adapter
//! - **Locator**: picks the sentence-final predicate unit
//! - **Features**: flattens the predicate unit into a [`Features`] record
//! - **Rules**: the [`RULES`] cascade, backed by a data-driven [`Lexicon`]
//! - **Classifier**: normalizes the three input shapes and ties it together
//!
//! # Example
//!
//! ```rust
//! use ishi_core::analysis::knp;
//! use ishi_core::{Classifier, KnpCommand, Lexicon};
//!
//! let analysis = "\
//! ## S-ID:1
//! * -1D <文末><用言:動>
//! + -1D <文末><用言:動>
//! 走る はしる 走る 動詞 2 * 0 子音動詞ラ行 10 基本形 2 NIL <自立><内容語>
//! EOS
//! ";
//! let sentence = knp::parse_sentence(analysis).unwrap();
//!
//! // Analyzed input never reaches the external analyzer
//! let classifier = Classifier::new(Lexicon::bundled().unwrap(), KnpCommand::default());
//! assert!(classifier.classify(&sentence).unwrap());
//! ```

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod lexicon;
pub mod locator;
pub mod rules;

pub use analysis::{Analyzer, KnpCommand, Morpheme, ParsedSentence, PredicateUnit, Tag};
pub use classifier::{classify, Classifier, Input};
pub use config::{AnalyzerConfig, ClassifierConfig, ClassifierConfigBuilder, LexiconSource};
pub use error::{
    AnalyzerError, ClassifyError, FormatError, InputError, LexiconError, Result,
};
pub use features::{FeatureExtractor, Features, PosCategory};
pub use lexicon::Lexicon;
pub use locator::locate_predicate;
pub use rules::{Rule, RuleEngine, RULES};
