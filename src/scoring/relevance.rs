use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::FALLBACK_RELEVANCE;
use crate::embedding::{TextEmbedder, cosine_similarity};

use super::error::ScoringError;

/// Maps a cosine similarity onto the 0-100 relevance scale.
///
/// The scaled value is truncated toward zero; negative similarity counts as
/// no relevance.
pub fn similarity_to_score(similarity: f32) -> f64 {
    (f64::from(similarity) * 100.0).trunc().clamp(0.0, 100.0)
}

/// Query/page relevance via embedding cosine similarity.
#[derive(Clone)]
pub struct RelevanceScorer {
    embedder: Option<Arc<dyn TextEmbedder>>,
}

impl std::fmt::Debug for RelevanceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer")
            .field("available", &self.is_available())
            .finish()
    }
}

impl RelevanceScorer {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder: Some(embedder),
        }
    }

    /// Scorer without an embedding service; always yields the fallback.
    pub fn unavailable() -> Self {
        Self { embedder: None }
    }

    pub fn is_available(&self) -> bool {
        self.embedder.is_some()
    }

    /// Scores `content` against `query`, reporting why no score was possible.
    pub fn try_score(&self, query: &str, content: &str) -> Result<f64, ScoringError> {
        if content.trim().is_empty() {
            return Err(ScoringError::EmptyContent);
        }

        let embedder = self
            .embedder
            .as_ref()
            .ok_or(ScoringError::ModelUnavailable {
                component: "embedder",
            })?;

        let query_embedding = embedder.embed(query)?;
        let content_embedding = embedder.embed(content)?;
        let similarity = cosine_similarity(&query_embedding, &content_embedding);
        let score = similarity_to_score(similarity);

        debug!(
            query_len = query.len(),
            content_len = content.len(),
            similarity,
            score,
            "Scored relevance"
        );

        Ok(score)
    }

    /// Like [`try_score`](Self::try_score), but any failure yields `0`.
    pub fn score(&self, query: &str, content: &str) -> f64 {
        match self.try_score(query, content) {
            Ok(score) => score,
            Err(ScoringError::EmptyContent) => FALLBACK_RELEVANCE,
            Err(e) => {
                warn!(error = %e, "Relevance scoring failed, using fallback");
                FALLBACK_RELEVANCE
            }
        }
    }
}
