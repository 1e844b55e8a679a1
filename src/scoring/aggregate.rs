use crate::constants::DEFAULT_RELEVANCE_WEIGHT;

use super::error::ScoringError;
use super::types::ScoreResult;

/// Weighted average of relevance and bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    relevance_weight: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            relevance_weight: DEFAULT_RELEVANCE_WEIGHT,
        }
    }
}

impl Aggregator {
    /// Sets the relevance weight; bias receives `1 - weight`.
    pub fn try_with_relevance_weight(mut self, weight: f64) -> Result<Self, ScoringError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(ScoringError::InvalidParameter {
                name: "relevance_weight",
                reason: "must be between 0.0 and 1.0",
            });
        }
        self.relevance_weight = weight;
        Ok(self)
    }

    pub fn relevance_weight(&self) -> f64 {
        self.relevance_weight
    }

    pub fn bias_weight(&self) -> f64 {
        1.0 - self.relevance_weight
    }

    pub fn combine(&self, content_relevance: f64, bias_score: f64) -> ScoreResult {
        ScoreResult {
            content_relevance,
            bias_score,
            final_validity_score: self.relevance_weight * content_relevance
                + self.bias_weight() * bias_score,
        }
    }

    /// Final score truncated toward zero, for integer ratings.
    pub fn combine_truncated(&self, content_relevance: f64, bias_score: f64) -> i64 {
        self.combine(content_relevance, bias_score)
            .final_validity_score
            .trunc() as i64
    }

    pub fn fallback(&self) -> ScoreResult {
        ScoreResult::fallback(self.relevance_weight)
    }
}
