use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_BIAS, FALLBACK_RELEVANCE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Scores for one (query, URL) pair, all on a 0-100 scale.
pub struct ScoreResult {
    /// Semantic similarity between query and page text.
    pub content_relevance: f64,
    /// Sentiment-derived neutrality proxy.
    pub bias_score: f64,
    /// Weighted combination of the two.
    pub final_validity_score: f64,
}

impl ScoreResult {
    /// Result reported for a page with no usable text.
    pub fn fallback(relevance_weight: f64) -> Self {
        Self {
            content_relevance: FALLBACK_RELEVANCE,
            bias_score: FALLBACK_BIAS,
            final_validity_score: relevance_weight * FALLBACK_RELEVANCE
                + (1.0 - relevance_weight) * FALLBACK_BIAS,
        }
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "relevance={:.1} bias={:.1} final={:.2}",
            self.content_relevance, self.bias_score, self.final_validity_score
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A [`ScoreResult`] plus what happened on the way to it.
pub struct Assessment {
    pub score: ScoreResult,
    /// Characters of paragraph text the page yielded.
    pub content_chars: usize,
    /// Set when the fetch failed and the page was scored as empty.
    pub fetch_error: Option<String>,
}

impl Assessment {
    /// `true` when the score is the empty-content default.
    pub fn is_degraded(&self) -> bool {
        self.fetch_error.is_some() || self.content_chars == 0
    }
}
