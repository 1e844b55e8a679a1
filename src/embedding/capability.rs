//! Capability traits the scorers depend on.
//!
//! Scorers hold these as `Arc<dyn ...>` so tests can swap in fixed-output
//! implementations and the binary can choose model-backed or stub backends.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::EmbeddingError;

/// Maps text to a dense vector.
pub trait TextEmbedder: Send + Sync {
    /// Embeds a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of the vectors returned by [`embed`](TextEmbedder::embed).
    fn embedding_dim(&self) -> usize;
}

/// Assigns a coarse sentiment to text.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError>;
}

impl<T: TextEmbedder + ?Sized> TextEmbedder for Arc<T> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Arc<T> {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError> {
        (**self).classify(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Three-level sentiment label.
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parses a classifier label.
    ///
    /// Accepts the label names case-insensitively, their common short forms,
    /// and the positional `LABEL_0`/`LABEL_1`/`LABEL_2` names (negative,
    /// neutral, positive) that three-class sentiment checkpoints ship with.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "label_2" => Some(Self::Positive),
            "neutral" | "neu" | "label_1" => Some(Self::Neutral),
            "negative" | "neg" | "label_0" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Classifier output: the winning label and its probability.
pub struct Classification {
    pub sentiment: Sentiment,
    pub confidence: f32,
}

impl Classification {
    pub fn new(sentiment: Sentiment, confidence: f32) -> Self {
        Self {
            sentiment,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Cosine similarity in `[-1, 1]`; `0.0` for mismatched, empty, or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}
