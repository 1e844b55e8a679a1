use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const ALL_VARS: [&str; 7] = [
    "URL_VALIDITY_EMBEDDER_PATH",
    "URL_VALIDITY_CLASSIFIER_PATH",
    "URL_VALIDITY_OUTPUT_PATH",
    "URL_VALIDITY_PRIOR_PATH",
    "URL_VALIDITY_TIMEOUT_SECS",
    "URL_VALIDITY_USER_AGENT",
    "URL_VALIDITY_EMBED_CACHE_CAPACITY",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_url_validity_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in ALL_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.embedder_path.is_none());
    assert!(config.classifier_path.is_none());
    assert_eq!(config.output_path, PathBuf::from("./deliverable.csv"));
    assert!(config.prior_path.is_none());
    assert_eq!(config.timeout_secs, 10);
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(config.embed_cache_capacity, 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fetch_config_from_fields() {
    let config = Config {
        timeout_secs: 3,
        user_agent: "validity-bot/1.0".to_string(),
        ..Default::default()
    };

    let fetch = config.fetch_config();

    assert_eq!(fetch.timeout, std::time::Duration::from_secs(3));
    assert_eq!(fetch.user_agent, "validity-bot/1.0");
}

#[test]
fn test_model_configs_default_to_stub() {
    let config = Config::default();
    assert!(config.embedder_config().testing_stub);
    assert!(config.classifier_config().model_path.is_none());

    let config = Config {
        embedder_path: Some(PathBuf::from("/models/mpnet")),
        classifier_path: Some(PathBuf::from("/models/roberta")),
        ..Default::default()
    };
    assert!(!config.embedder_config().testing_stub);
    assert_eq!(
        config.embedder_config().model_dir,
        PathBuf::from("/models/mpnet")
    );
    assert_eq!(
        config.classifier_config().model_path,
        Some(PathBuf::from("/models/roberta"))
    );
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_url_validity_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.output_path, PathBuf::from("./deliverable.csv"));
    assert_eq!(config.timeout_secs, 10);
    assert!(config.embedder_path.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_url_validity_env();

    let config = with_env_vars(
        &[
            ("URL_VALIDITY_EMBEDDER_PATH", "/models/mpnet"),
            ("URL_VALIDITY_CLASSIFIER_PATH", "/models/roberta"),
            ("URL_VALIDITY_OUTPUT_PATH", "/tmp/out.csv"),
            ("URL_VALIDITY_PRIOR_PATH", "/tmp/seed.csv"),
            ("URL_VALIDITY_TIMEOUT_SECS", "30"),
            ("URL_VALIDITY_USER_AGENT", "validity-bot/1.0"),
            ("URL_VALIDITY_EMBED_CACHE_CAPACITY", "0"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.embedder_path, Some(PathBuf::from("/models/mpnet")));
    assert_eq!(config.classifier_path, Some(PathBuf::from("/models/roberta")));
    assert_eq!(config.output_path, PathBuf::from("/tmp/out.csv"));
    assert_eq!(config.prior_path, Some(PathBuf::from("/tmp/seed.csv")));
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.user_agent, "validity-bot/1.0");
    assert_eq!(config.embed_cache_capacity, 0);
}

#[test]
#[serial]
fn test_blank_values_fall_back() {
    clear_url_validity_env();

    let config = with_env_vars(
        &[
            ("URL_VALIDITY_EMBEDDER_PATH", "   "),
            ("URL_VALIDITY_OUTPUT_PATH", ""),
            ("URL_VALIDITY_USER_AGENT", " "),
        ],
        Config::from_env,
    )
    .unwrap();

    assert!(config.embedder_path.is_none());
    assert_eq!(config.output_path, PathBuf::from("./deliverable.csv"));
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
}

#[test]
#[serial]
fn test_model_paths_match_component_configs() {
    clear_url_validity_env();

    let (config, embedder, classifier) = with_env_vars(
        &[
            ("URL_VALIDITY_EMBEDDER_PATH", " /models/minilm "),
            ("URL_VALIDITY_CLASSIFIER_PATH", " /models/roberta "),
        ],
        || {
            (
                Config::from_env().unwrap(),
                SentenceEmbedderConfig::from_env(),
                ClassifierConfig::from_env(),
            )
        },
    );

    assert_eq!(config.embedder_path, Some(embedder.model_dir));
    assert_eq!(config.classifier_path, classifier.model_path);
    assert_eq!(config.classifier_path, Some(PathBuf::from("/models/roberta")));
}

#[test]
#[serial]
fn test_zero_timeout_rejected() {
    clear_url_validity_env();

    let result = with_env_vars(&[("URL_VALIDITY_TIMEOUT_SECS", "0")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidTimeout { value: 0 })
    ));
}

#[test]
#[serial]
fn test_non_numeric_timeout_rejected() {
    clear_url_validity_env();

    let result = with_env_vars(&[("URL_VALIDITY_TIMEOUT_SECS", "ten")], Config::from_env);

    match result {
        Err(ConfigError::InvalidNumber { name, value, .. }) => {
            assert_eq!(name, "URL_VALIDITY_TIMEOUT_SECS");
            assert_eq!(value, "ten");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_negative_capacity_rejected() {
    clear_url_validity_env();

    let result = with_env_vars(
        &[("URL_VALIDITY_EMBED_CACHE_CAPACITY", "-1")],
        Config::from_env,
    );

    assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        embedder_path: Some(PathBuf::from("/nonexistent/url-validity/model")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_model_path_must_be_dir() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("model.safetensors");
    std::fs::write(&file, b"").unwrap();

    let config = Config {
        classifier_path: Some(file),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_output_must_not_be_dir() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        output_path: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_prior_path() {
    let dir = TempDir::new().unwrap();

    let missing = Config {
        prior_path: Some(dir.path().join("seed.csv")),
        ..Default::default()
    };
    assert!(matches!(
        missing.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));

    let as_dir = Config {
        prior_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(as_dir.validate(), Err(ConfigError::NotAFile { .. })));

    let seed = dir.path().join("seed.csv");
    std::fs::write(&seed, "user_prompt,url_to_check,func_rating,custom_rating\n").unwrap();
    let present = Config {
        prior_path: Some(seed),
        ..Default::default()
    };
    assert!(present.validate().is_ok());
}

#[test]
fn test_validate_empty_user_agent() {
    let config = Config {
        user_agent: "  ".to_string(),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::EmptyUserAgent)));
}

#[test]
fn test_error_messages() {
    let err = ConfigError::InvalidTimeout { value: 0 };
    assert!(err.to_string().contains("greater than zero"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/models/x"),
    };
    assert_eq!(err.to_string(), "path does not exist: /models/x");
}
