use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::{
    BIAS_INPUT_CHARS, FALLBACK_BIAS, NEGATIVE_BIAS_SCORE, NEUTRAL_BIAS_SCORE, POSITIVE_BIAS_SCORE,
};
use crate::embedding::{Sentiment, SentimentClassifier};

use super::error::ScoringError;

/// Fixed score for each sentiment level.
pub fn bias_for_sentiment(sentiment: Sentiment) -> f64 {
    match sentiment {
        Sentiment::Positive => POSITIVE_BIAS_SCORE,
        Sentiment::Neutral => NEUTRAL_BIAS_SCORE,
        Sentiment::Negative => NEGATIVE_BIAS_SCORE,
    }
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Sentiment-derived bias score over the head of the page text.
#[derive(Clone)]
pub struct BiasScorer {
    classifier: Option<Arc<dyn SentimentClassifier>>,
    max_chars: usize,
}

impl std::fmt::Debug for BiasScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasScorer")
            .field("available", &self.is_available())
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

impl BiasScorer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
            max_chars: BIAS_INPUT_CHARS,
        }
    }

    /// Scorer without a classifier; always yields the neutral fallback.
    pub fn unavailable() -> Self {
        Self {
            classifier: None,
            max_chars: BIAS_INPUT_CHARS,
        }
    }

    /// Overrides the classifier input budget.
    pub fn try_with_max_chars(mut self, max_chars: usize) -> Result<Self, ScoringError> {
        if max_chars == 0 {
            return Err(ScoringError::InvalidParameter {
                name: "max_chars",
                reason: "must be greater than zero",
            });
        }
        self.max_chars = max_chars;
        Ok(self)
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn try_score(&self, content: &str) -> Result<f64, ScoringError> {
        if content.trim().is_empty() {
            return Err(ScoringError::EmptyContent);
        }

        let classifier = self
            .classifier
            .as_ref()
            .ok_or(ScoringError::ModelUnavailable {
                component: "sentiment classifier",
            })?;

        let head = truncate_chars(content, self.max_chars);
        let classification = classifier.classify(head)?;
        let score = bias_for_sentiment(classification.sentiment);

        debug!(
            input_chars = head.chars().count(),
            sentiment = %classification.sentiment,
            confidence = classification.confidence,
            score,
            "Scored bias"
        );

        Ok(score)
    }

    /// Like [`try_score`](Self::try_score), but any failure yields `50`.
    pub fn score(&self, content: &str) -> f64 {
        match self.try_score(content) {
            Ok(score) => score,
            Err(ScoringError::EmptyContent) => FALLBACK_BIAS,
            Err(e) => {
                warn!(error = %e, "Bias scoring failed, using fallback");
                FALLBACK_BIAS
            }
        }
    }
}
