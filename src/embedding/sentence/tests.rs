use super::*;
use crate::embedding::capability::cosine_similarity;
use std::path::PathBuf;

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_config_default() {
        let config = SentenceEmbedderConfig::default();
        assert_eq!(config.embedding_dim, SENTENCE_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, SENTENCE_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_config_new() {
        let config = SentenceEmbedderConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(config.model_dir, PathBuf::from("/models/all-MiniLM-L6-v2"));
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_config_stub_validates() {
        assert!(SentenceEmbedderConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_config_empty_dir_rejected() {
        let err = SentenceEmbedderConfig::default().validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_config_missing_dir_rejected() {
        let err = SentenceEmbedderConfig::new("/nonexistent/model/dir")
            .validate()
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_config_dir_without_weights_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let err = SentenceEmbedderConfig::new(dir.path())
            .validate()
            .unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert_eq!(path, dir.path().join("model.safetensors"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_zero_seq_len_rejected() {
        let config = SentenceEmbedderConfig::stub().with_max_seq_len(0);
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_without_var_is_stub() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { env::remove_var(SentenceEmbedderConfig::ENV_MODEL_DIR) };
        assert!(SentenceEmbedderConfig::from_env().testing_stub);
    }

    #[test]
    #[serial]
    fn test_from_env_with_var() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { env::set_var(SentenceEmbedderConfig::ENV_MODEL_DIR, " /models/minilm ") };
        let config = SentenceEmbedderConfig::from_env();
        unsafe { env::remove_var(SentenceEmbedderConfig::ENV_MODEL_DIR) };

        assert!(!config.testing_stub);
        assert_eq!(config.model_dir, PathBuf::from("/models/minilm"));
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_load() {
        let embedder = SentenceEmbedder::stub().unwrap();
        assert!(embedder.is_stub());
        assert!(!embedder.has_model());
        assert_eq!(embedder.embedding_dim(), SENTENCE_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let a = embedder.embed("symptoms of flu").unwrap();
        let b = embedder.embed("symptoms of flu").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_is_normalized() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("how to bake a chocolate cake").unwrap();
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("   ").unwrap();
        assert_eq!(embedding.len(), SENTENCE_EMBEDDING_DIM);
        assert!(embedding.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_stub_shared_words_are_more_similar() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let query = embedder.embed("flu symptoms fever cough").unwrap();
        let related = embedder
            .embed("Common flu symptoms include fever and a dry cough")
            .unwrap();
        let unrelated = embedder
            .embed("Preheat the oven and whisk the eggs with sugar")
            .unwrap();

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_stub_is_case_insensitive() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let lower = embedder.embed("ancient rome").unwrap();
        let upper = embedder.embed("Ancient ROME").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_load_missing_model_fails() {
        let result = SentenceEmbedder::load(SentenceEmbedderConfig::new("/nonexistent/dir"));
        assert!(matches!(
            result.unwrap_err(),
            EmbeddingError::ModelNotFound { .. }
        ));
    }

    #[test]
    fn test_debug_shows_backend() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let debug_str = format!("{:?}", embedder);
        assert!(debug_str.contains("SentenceEmbedder"));
        assert!(debug_str.contains("Stub"));
    }
}
