//! End-to-end classification over hand-written KNP output
//!
//! Each fixture under `tests/fixtures/` is KNP `-tab` output for one
//! sentence, written by hand in the shape the Juman++/KNP pipeline produces.
//! Only the fields the classifier reads are filled in faithfully, so these
//! tests run without Juman++ or KNP installed.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use ishi_core::analysis::knp;
use ishi_core::{
    locate_predicate, AnalyzerError, ClassifyError, Classifier, FeatureExtractor, InputError,
    Lexicon, ParsedSentence, PosCategory, RuleEngine,
};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.knp"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

fn parsed(name: &str) -> ParsedSentence {
    knp::parse_sentence(&fixture(name)).expect("fixture should parse")
}

/// Analyzer replaying fixture output keyed by input text
struct FixtureAnalyzer {
    outputs: HashMap<&'static str, &'static str>,
}

impl FixtureAnalyzer {
    fn new() -> Self {
        let outputs = HashMap::from([
            ("自然言語処理の勉強をする", "benkyou_wo_suru"),
            ("自然言語処理は楽しい", "tanoshii"),
            ("自然言語処理を学べる", "manaberu"),
            ("自然言語処理の勉強を始めてびっくりした", "hajimete_bikkuri_shita"),
            ("深い洞察だ", "dousatsu_da"),
            ("考えさせる", "kangaesaseru"),
            ("推論される", "suiron_sareru"),
            ("考えてしまう", "kangaete_shimau"),
            ("気付く", "kidzuku"),
            ("考えない", "kangaenai"),
            ("２台までしか契約できない", "keiyaku_dekinai"),
            ("考えて下さい", "kangaete_kudasai"),
            ("花火。", "hanabi"),
            ("考えられる", "kangaerareru"),
            ("考えさせられる", "kangaesaserareru"),
            ("走らされる", "hashirasareru"),
            ("考えすぎる", "kangaesugiru"),
            ("考えやすい", "kangaeyasui"),
            ("考えてくれる", "kangaete_kureru"),
            ("考えちまう", "kangaechimau"),
            ("考えなさい", "kangaenasai"),
            ("美しい", "utsukushii"),
            ("花火だ", "hanabi_da"),
            ("びっくりする", "bikkuri_suru"),
            ("温まる", "atatamaru"),
            ("飲める", "nomeru"),
            ("通り過ぎる", "toorisugiru"),
            ("かくれる", "kakureru"),
            ("iPhone 15を買う", "iphone_wo_kau"),
        ]);
        Self { outputs }
    }
}

impl ishi_core::Analyzer for FixtureAnalyzer {
    fn analyze(&self, text: &str) -> Result<ParsedSentence, AnalyzerError> {
        let name = self.outputs.get(text).ok_or_else(|| AnalyzerError::Failed {
            status: "exit status: 1".to_string(),
            stderr: format!("no recording for {text}"),
        })?;
        Ok(knp::parse_sentence(&fixture(name))?)
    }
}

fn classifier() -> Classifier<'static, FixtureAnalyzer> {
    Classifier::bundled(FixtureAnalyzer::new()).unwrap()
}

#[test]
fn test_volitional_sentences() {
    let classifier = classifier();
    for text in [
        "自然言語処理の勉強をする",
        "考えさせる",
        "考えない",
        "考えて下さい",
        "考えなさい",
        "通り過ぎる",
        "かくれる",
        "iPhone 15を買う",
    ] {
        assert!(
            classifier.classify(text).unwrap(),
            "{text} should be volitional"
        );
    }
}

#[test]
fn test_non_volitional_sentences() {
    let classifier = classifier();
    for text in [
        "自然言語処理は楽しい",
        "自然言語処理を学べる",
        "自然言語処理の勉強を始めてびっくりした",
        "深い洞察だ",
        "推論される",
        "考えてしまう",
        "気付く",
        "２台までしか契約できない",
        "考えられる",
        "考えさせられる",
        "走らされる",
        "考えすぎる",
        "考えやすい",
        "考えてくれる",
        "考えちまう",
        "美しい",
        "花火だ",
        "びっくりする",
        "温まる",
        "飲める",
    ] {
        assert!(
            !classifier.classify(text).unwrap(),
            "{text} should not be volitional"
        );
    }
}

#[test]
fn test_fired_rules() {
    let lexicon = Lexicon::bundled().unwrap();
    let extractor = FeatureExtractor::new(lexicon);
    let engine = RuleEngine::new(lexicon);

    let cases = [
        ("benkyou_wo_suru", "volitional-verb"),
        ("tanoshii", "adjective"),
        ("manaberu", "potential-form"),
        ("hajimete_bikkuri_shita", "non-volition-idiom"),
        ("kidzuku", "non-volition-idiom"),
        ("dousatsu_da", "linking-verb"),
        ("suiron_sareru", "passive-voice"),
        ("kangaete_shimau", "non-volition-suffix"),
        ("keiyaku_dekinai", "potential-form"),
        ("kangaete_kudasai", "volitional-verb"),
        ("kangaerareru", "passive-voice"),
        ("kangaesaserareru", "passive-voice"),
        ("hashirasareru", "passive-voice"),
        ("kangaesugiru", "non-volition-suffix"),
        ("kangaeyasui", "adjective"),
        ("kangaete_kureru", "non-volition-suffix"),
        ("kangaechimau", "non-volition-suffix"),
        ("kangaenasai", "volitional-verb"),
        ("utsukushii", "adjective"),
        ("hanabi_da", "linking-verb"),
        ("bikkuri_suru", "non-volition-idiom"),
        ("atatamaru", "non-volition-idiom"),
        ("nomeru", "potential-form"),
        ("toorisugiru", "volitional-verb"),
        ("kakureru", "volitional-verb"),
        ("iphone_wo_kau", "volitional-verb"),
    ];

    for (name, expected) in cases {
        let sentence = parsed(name);
        let unit = locate_predicate(&sentence).unwrap();
        let features = extractor.extract(&unit);
        assert_eq!(engine.evaluate(&features).name, expected, "fixture {name}");
    }
}

#[test]
fn test_extracted_features() {
    let lexicon = Lexicon::bundled().unwrap();
    let extractor = FeatureExtractor::new(lexicon);

    let sentence = parsed("hajimete_bikkuri_shita");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.surface_lexeme, "びっくりする");
    assert_eq!(features.pos_category, PosCategory::Verb);
    assert_eq!(features.conjugation_form, "タ形");
    assert!(features.attached_auxiliaries.is_empty());

    let sentence = parsed("suiron_sareru");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.surface_lexeme, "推論");
    assert_eq!(features.attached_auxiliaries, vec!["する", "れる"]);
    assert!(features.is_passive_voice);

    let sentence = parsed("dousatsu_da");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.pos_category, PosCategory::NounPredicate);
    assert!(features.is_linking_verb);
}

#[test]
fn test_suffix_rule_reads_only_attached_morphemes() {
    let lexicon = Lexicon::bundled().unwrap();
    let extractor = FeatureExtractor::new(lexicon);

    // The lemma ends in 過ぎる, but nothing follows the head
    let sentence = parsed("toorisugiru");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.surface_lexeme, "通り過ぎる");
    assert!(features.attached_auxiliaries.is_empty());

    let sentence = parsed("kangaesugiru");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.surface_lexeme, "考える");
    assert_eq!(features.attached_auxiliaries, vec!["すぎる"]);

    let sentence = parsed("kangaenasai");
    let features = extractor.extract(&locate_predicate(&sentence).unwrap());
    assert_eq!(features.attached_auxiliaries, vec!["なさる"]);
    assert!(features.is_imperative());
}

#[test]
fn test_governing_predicate_is_sentence_final() {
    let sentence = parsed("hajimete_bikkuri_shita");
    let unit = locate_predicate(&sentence).unwrap();
    assert_eq!(unit.surface(), "びっくりした");
    assert!(std::ptr::eq(unit.tag(), sentence.tags().last().unwrap()));
}

#[test]
fn test_input_shapes_agree() {
    let classifier = classifier();
    let cases = [
        ("自然言語処理の勉強をする", "benkyou_wo_suru"),
        ("自然言語処理を学べる", "manaberu"),
        ("自然言語処理の勉強を始めてびっくりした", "hajimete_bikkuri_shita"),
        ("考えさせる", "kangaesaseru"),
    ];

    for (text, name) in cases {
        let sentence = parsed(name);
        let unit = locate_predicate(&sentence).unwrap();

        let from_text = classifier.classify(text).unwrap();
        let from_sentence = classifier.classify(&sentence).unwrap();
        let from_unit = classifier.classify(unit).unwrap();

        assert_eq!(from_text, from_sentence, "{text}");
        assert_eq!(from_sentence, from_unit, "{text}");
    }
}

#[test]
fn test_isolated_predicate_matches_whole_sentence() {
    let classifier = classifier();
    let sentence = parsed("hajimete_bikkuri_shita");

    let last = sentence.tags().last().unwrap().clone();
    let isolated = ParsedSentence::new(vec![last]);

    assert_eq!(
        classifier.classify(&isolated).unwrap(),
        classifier.classify(&sentence).unwrap()
    );
}

#[test]
fn test_classification_is_idempotent() {
    let classifier = classifier();
    for text in ["自然言語処理の勉強をする", "推論される", "考えてしまう"] {
        let first = classifier.classify(text).unwrap();
        let second = classifier.classify(text).unwrap();
        assert_eq!(first, second, "{text}");
    }
}

#[test]
fn test_sentence_without_predicate() {
    let classifier = classifier();
    assert!(matches!(
        classifier.classify("花火。"),
        Err(ClassifyError::PredicateNotFound)
    ));
    assert!(matches!(
        classifier.classify(&parsed("hanabi")),
        Err(ClassifyError::PredicateNotFound)
    ));
}

#[test]
fn test_empty_text_never_reaches_analyzer() {
    let calls = Cell::new(0);
    let analyzer = |_: &str| -> Result<ParsedSentence, AnalyzerError> {
        calls.set(calls.get() + 1);
        Ok(parsed("benkyou_wo_suru"))
    };
    let classifier = Classifier::bundled(analyzer).unwrap();

    for text in ["", "   ", "\t\n"] {
        assert!(matches!(
            classifier.classify(text),
            Err(ClassifyError::Input(InputError::EmptyText))
        ));
    }
    assert_eq!(calls.get(), 0);

    classifier.classify("自然言語処理の勉強をする").unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_malformed_analyzer_output() {
    let analyzer = |_: &str| -> Result<ParsedSentence, AnalyzerError> {
        Ok(knp::parse_sentence(&fixture("truncated"))?)
    };
    let classifier = Classifier::bundled(analyzer).unwrap();

    match classifier.classify("気付く") {
        Err(ClassifyError::Input(InputError::Analyzer(AnalyzerError::Format(err)))) => {
            assert_eq!(err.line, 4);
        }
        other => panic!("Expected a format error, got {other:?}"),
    }
}

#[test]
fn test_custom_lexicon_changes_verdicts() {
    let lexicon = Lexicon::from_toml_str(
        r#"
[metadata]
name = "strict"

[adjective]
pos = ["形容詞"]

[non_volition]
idioms = ["考える"]
"#,
    )
    .unwrap();
    let classifier = Classifier::new(&lexicon, FixtureAnalyzer::new());

    assert!(!classifier.classify("考えない").unwrap());
    assert!(classifier.classify("自然言語処理の勉強をする").unwrap());
    // Potential markers are not listed, so the potential verb counts as volitional
    assert!(classifier.classify("自然言語処理を学べる").unwrap());
}

#[test]
fn test_shared_across_threads() {
    let classifier = Arc::new(classifier());
    let texts = [
        "自然言語処理の勉強をする",
        "自然言語処理は楽しい",
        "考えさせる",
        "推論される",
    ];
    let expected: Vec<bool> = texts
        .iter()
        .map(|t| classifier.classify(*t).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                texts
                    .iter()
                    .map(|t| classifier.classify(*t).unwrap())
                    .collect::<Vec<bool>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
