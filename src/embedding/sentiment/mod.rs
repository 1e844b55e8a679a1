//! Three-class sentiment classifier (BERT / RoBERTa sequence classification).
//!
//! Without a model path the classifier runs a small word lexicon instead, which
//! keeps the pipeline usable in tests and on machines without model files.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{CLASSIFIER_MAX_SEQ_LEN, ClassifierConfig};

use candle_core::{D, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::bert::BertClassifier;
use crate::embedding::capability::{Classification, Sentiment, SentimentClassifier};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{load_tokenizer_with_truncation, missing_model_file};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "best", "benefit", "benefits", "healthy", "improve",
    "improved", "success", "successful", "safe", "effective", "happy", "love", "positive",
    "helpful", "recommended", "win", "progress", "breakthrough", "enjoy", "easy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worst", "terrible", "risk", "risks", "danger", "dangerous", "death", "deaths",
    "died", "crisis", "fail", "failed", "failure", "harmful", "war", "attack", "disease",
    "poor", "negative", "fear", "loss", "killed", "scam", "hate",
];

pub struct SequenceClassifier {
    device: candle_core::Device,
    config: ClassifierConfig,
    model: Option<BertClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for SequenceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl SequenceClassifier {
    pub fn load(config: ClassifierConfig) -> Result<Self, EmbeddingError> {
        if let Err(reason) = config.validate() {
            return Err(EmbeddingError::InvalidConfig { reason });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for classifier");

        let Some(ref model_path) = config.model_path else {
            info!("No classifier model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        if !model_path.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: model_path.clone(),
            });
        }
        if let Some(path) = missing_model_file(model_path) {
            return Err(EmbeddingError::ModelNotFound { path });
        }

        info!(model_path = %model_path.display(), "Loading sentiment classifier");

        let model = BertClassifier::load(model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            }
        })?;

        for label in model.labels() {
            if Sentiment::from_label(label).is_none() {
                return Err(EmbeddingError::UnknownLabel {
                    label: label.clone(),
                });
            }
        }

        let tokenizer =
            load_tokenizer_with_truncation(model_path, config.max_seq_len).map_err(|e| {
                EmbeddingError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                }
            })?;

        info!(
            labels = ?model.labels(),
            architecture = ?model.architecture(),
            "Sentiment classifier loaded"
        );

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(ClassifierConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn classify_with_model(
        &self,
        text: &str,
        model: &BertClassifier,
        tokenizer: &Tokenizer,
    ) -> Result<Classification, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        let (best_idx, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "classifier returned no logits".to_string(),
            })?;

        let label = model
            .labels()
            .get(best_idx)
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("logit index {best_idx} has no label"),
            })?;
        let sentiment =
            Sentiment::from_label(label).ok_or_else(|| EmbeddingError::UnknownLabel {
                label: label.clone(),
            })?;

        debug!(%sentiment, confidence, "Classified text");

        Ok(Classification::new(sentiment, confidence))
    }

    fn classify_with_lexicon(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();
        let (mut positive, mut negative) = (0usize, 0usize);

        for word in lower.split(|c: char| !c.is_alphanumeric()) {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        let total = positive + negative;
        let classification = if positive > negative {
            Classification::new(Sentiment::Positive, positive as f32 / total as f32)
        } else if negative > positive {
            Classification::new(Sentiment::Negative, negative as f32 / total as f32)
        } else {
            Classification::new(Sentiment::Neutral, if total == 0 { 1.0 } else { 0.5 })
        };

        debug!(
            positive,
            negative,
            sentiment = %classification.sentiment,
            "Classified text (stub)"
        );

        classification
    }
}

impl SentimentClassifier for SequenceClassifier {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError> {
        match (&self.model, &self.tokenizer) {
            (Some(model), Some(tokenizer)) => self.classify_with_model(text, model, tokenizer),
            _ => Ok(self.classify_with_lexicon(text)),
        }
    }
}
