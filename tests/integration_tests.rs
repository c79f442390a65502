//! 통합 테스트 - 학습/스코어링/판정 전체 흐름

use gibberish::ngram::{DetectorConfig, LineSet, ThresholdStrategy};
use gibberish::{
    default_model, detect, is_valid_matrix, is_valid_model, sanitize, score, train, Detector,
    GibberishError, Model,
};
use serde_json::json;

const PROGRAMMER_CORPUS: &str = "Hello, I am a programmer. I have been writing software for \
most of my life, and I still enjoy it every day. When I was young I taught myself to write \
small games on an old computer that my father brought home from work. Later I studied at a \
university, where I learned about algorithms, data structures and the way that machines \
really work. Today I build tools that other people use to do their own work, and I try to \
make them simple, fast and easy to understand. I believe that good code is written for \
people first and for computers second. I like to read, to walk in the park near my house, \
and to cook dinner for my friends on the weekend...";

fn programmer_model() -> Model {
    train(
        PROGRAMMER_CORPUS,
        vec![
            "I have been a programmer since I was about eleven years old",
            "I like to cook dinner for my friends",
            "good code is written for people",
        ],
        vec![
            "xcxmxnfzxdzxdfmahtuaewitsp",
            "kjaanbcasofwetoaretioafsaio",
            "xtiamnadmgtae",
        ],
    )
    .unwrap()
}

#[test]
fn test_train_produces_valid_model() {
    assert!(PROGRAMMER_CORPUS.len() >= 400);

    let model = programmer_model();
    let value = model.to_json_value().unwrap();

    assert!(is_valid_model(&value));
    assert!(is_valid_matrix(&value["matrix"]));
    assert!(!model.table().is_empty());
}

#[test]
fn test_train_accepts_newline_delimited_lines() {
    let from_vec = programmer_model();
    let from_text = train(
        PROGRAMMER_CORPUS,
        "I have been a programmer since I was about eleven years old\n\
         I like to cook dinner for my friends\n\
         good code is written for people\n",
        LineSet::from_text(
            "  xcxmxnfzxdzxdfmahtuaewitsp\nkjaanbcasofwetoaretioafsaio\nxtiamnadmgtae  ",
        ),
    )
    .unwrap();

    assert_eq!(from_vec, from_text);
}

#[test]
fn test_default_model_scenarios() {
    assert!(!detect("Hello, how are you? it is nice to meet you."));
    assert!(!detect("Hi"));
    assert!(detect("nakjsfnzgfaekjajdgli"));
}

#[test]
fn test_zero_pair_inputs_are_gibberish() {
    assert!(detect(""));
    assert!(detect("a"));
    assert!(detect("  ?!  "));
    assert!(detect("1234"));
}

#[test]
fn test_default_model_well_calibrated() {
    let baseline = default_model().baseline();
    assert!(baseline.good.min > baseline.bad.max);
}

#[test]
fn test_sanitize_idempotent() {
    let inputs = [
        "Hello, how are you? it is nice to meet you.",
        "Ça va?  Très bien -- merci!",
        "line one\nline two\tand three",
        "numbers 1 2 3 and symbols @ # $",
        "Γειά σου κόσμε",
        "",
    ];
    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }
}

#[test]
fn test_cache_transparency_and_determinism() {
    let model = default_model();
    let inputs = [
        "Hello, how are you?",
        "the the the the the the",
        "nakjsfnzgfaekjajdgli",
        "x",
        "",
    ];
    for input in inputs {
        let cached = score(input, model, true);
        let uncached = score(input, model, false);
        assert_eq!(cached, uncached);
        assert_eq!(score(input, model, true), cached);
        assert_eq!(detect(input), detect(input));
    }
}

#[test]
fn test_score_accepts_table_or_model() {
    let model = programmer_model();
    assert_eq!(
        score("a programmer", &model, true),
        score("a programmer", model.table(), true)
    );
}

#[test]
fn test_invalid_override_rejected() {
    let detector = Detector::new();
    let result = detector.detect_with_override("hello", Some(&json!({ "cowsGo": "moo" })));
    assert!(matches!(result, Err(GibberishError::ModelValidationError(_))));
}

#[test]
fn test_override_with_trained_model() {
    let detector = Detector::new();
    let override_model = programmer_model().to_json_value().unwrap();

    assert!(!detector
        .detect_with_override("I am a programmer", Some(&override_model))
        .unwrap());
    assert!(detector
        .detect_with_override("qzxvkjw pqzx", Some(&override_model))
        .unwrap());
}

#[test]
fn test_override_with_extreme_counts() {
    let detector = Detector::new();
    let override_model = json!({
        "matrix": [
            { "x": "ab", "y": u64::MAX },
            { "x": "ba", "y": u64::MAX }
        ],
        "baseline": {
            "good": { "min": 10.0, "max": 20.0, "avg": 15.0 },
            "bad": { "min": 0.0, "max": 1.0, "avg": 0.5 }
        }
    });
    assert!(is_valid_model(&override_model));

    assert!(!detector
        .detect_with_override("abab", Some(&override_model))
        .unwrap());
    assert!(detector
        .detect_with_override("xyz", Some(&override_model))
        .unwrap());
}

#[test]
fn test_threshold_config_errors() {
    let result = DetectorConfig::from_json_value(&json!({ "threshold": 12 }));
    assert!(matches!(result, Err(GibberishError::ConfigError(_))));

    let result = DetectorConfig::default().with_threshold(ThresholdStrategy::custom(|_| f64::NAN));
    assert!(matches!(result, Err(GibberishError::ConfigError(_))));
}

#[test]
fn test_custom_threshold_strategy() {
    // 임계값을 bad.max로 두면 비정상 예시 중 최댓값은 여전히 가비지
    let config = DetectorConfig::new(
        programmer_model(),
        ThresholdStrategy::custom(|m| m.baseline().bad.max),
        true,
    )
    .unwrap();
    let detector = Detector::with_config(config);

    assert!(detector.is_gibberish("kjaanbcasofwetoaretioafsaio"));
    assert!(!detector.is_gibberish("I have been a programmer"));
}

#[test]
fn test_model_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let model = programmer_model();
    model.save(&path).unwrap();
    let loaded = Model::load(&path).unwrap();

    assert_eq!(loaded.table(), model.table());
    let (a, b) = (loaded.baseline(), model.baseline());
    assert!((a.good.min - b.good.min).abs() < 1e-9);
    assert!((a.bad.max - b.bad.max).abs() < 1e-9);
}

#[test]
fn test_shipped_model_matches_bundled_training_data() {
    let corpus = include_str!("../data/corpus.txt");
    let good = include_str!("../data/good.txt");
    let bad = include_str!("../data/bad.txt");

    let model = train(corpus, good, bad).unwrap();
    let shipped = default_model();

    assert_eq!(model.table(), shipped.table());

    let (a, b) = (model.baseline(), shipped.baseline());
    for (x, y) in [
        (a.good.min, b.good.min),
        (a.good.max, b.good.max),
        (a.good.avg, b.good.avg),
        (a.bad.min, b.bad.min),
        (a.bad.max, b.bad.max),
        (a.bad.avg, b.bad.avg),
    ] {
        assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
    }
}
