use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = ClassifierConfig::default();

    assert!(config.model_path.is_none());
    assert_eq!(config.max_seq_len, CLASSIFIER_MAX_SEQ_LEN);
}

#[test]
fn test_config_new() {
    let config = ClassifierConfig::new("/models/twitter-roberta-base-sentiment");

    assert_eq!(
        config.model_path,
        Some(PathBuf::from("/models/twitter-roberta-base-sentiment"))
    );
}

#[test]
fn test_config_validate() {
    assert!(ClassifierConfig::default().validate().is_ok());

    let empty_path = ClassifierConfig {
        model_path: Some(PathBuf::new()),
        ..Default::default()
    };
    assert!(empty_path.validate().is_err());

    let zero_len = ClassifierConfig {
        max_seq_len: 0,
        ..Default::default()
    };
    assert!(zero_len.validate().is_err());
}

#[test]
#[serial]
fn test_config_from_env() {
    // SAFETY: Test code only, serialized with other env tests.
    unsafe { env::set_var(ClassifierConfig::ENV_MODEL_PATH, " /models/roberta ") };
    let config = ClassifierConfig::from_env();
    unsafe { env::remove_var(ClassifierConfig::ENV_MODEL_PATH) };

    assert_eq!(config.model_path, Some(PathBuf::from("/models/roberta")));
    assert_eq!(config.max_seq_len, CLASSIFIER_MAX_SEQ_LEN);
}

#[test]
#[serial]
fn test_config_from_env_blank_is_stub() {
    // SAFETY: Test code only, serialized with other env tests.
    unsafe { env::set_var(ClassifierConfig::ENV_MODEL_PATH, "  ") };
    let config = ClassifierConfig::from_env();
    unsafe { env::remove_var(ClassifierConfig::ENV_MODEL_PATH) };

    assert!(config.model_path.is_none());
}

#[test]
fn test_stub_creation() {
    let classifier = SequenceClassifier::stub().unwrap();
    assert!(!classifier.is_model_loaded());
}

#[test]
fn test_load_with_missing_model() {
    let result = SequenceClassifier::load(ClassifierConfig::new("/nonexistent/classifier"));

    assert!(matches!(
        result.unwrap_err(),
        EmbeddingError::ModelNotFound { .. }
    ));
}

#[test]
fn test_load_with_invalid_config() {
    let config = ClassifierConfig {
        max_seq_len: 0,
        ..Default::default()
    };

    assert!(matches!(
        SequenceClassifier::load(config).unwrap_err(),
        EmbeddingError::InvalidConfig { .. }
    ));
}

#[test]
fn test_stub_positive_text() {
    let classifier = SequenceClassifier::stub().unwrap();
    let result = classifier
        .classify("Regular exercise has great benefits and is a safe, effective habit")
        .unwrap();

    assert_eq!(result.sentiment, Sentiment::Positive);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_stub_negative_text() {
    let classifier = SequenceClassifier::stub().unwrap();
    let result = classifier
        .classify("The crisis caused deaths and the failed response was harmful")
        .unwrap();

    assert_eq!(result.sentiment, Sentiment::Negative);
}

#[test]
fn test_stub_neutral_text() {
    let classifier = SequenceClassifier::stub().unwrap();
    let result = classifier
        .classify("The museum opens at nine on weekdays.")
        .unwrap();

    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn test_stub_tie_is_neutral() {
    let classifier = SequenceClassifier::stub().unwrap();
    let result = classifier.classify("good and bad").unwrap();

    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(result.confidence, 0.5);
}

#[test]
fn test_stub_determinism() {
    let classifier = SequenceClassifier::stub().unwrap();
    let text = "A helpful guide to healthy sleep";

    assert_eq!(
        classifier.classify(text).unwrap(),
        classifier.classify(text).unwrap()
    );
}
