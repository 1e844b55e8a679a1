use tracing::{debug, info, warn};

use crate::fetch::PageFetcher;

use super::aggregate::Aggregator;
use super::bias::BiasScorer;
use super::relevance::RelevanceScorer;
use super::types::{Assessment, ScoreResult};

/// Fetch → relevance + bias → combine, for one (query, URL) pair at a time.
///
/// Every collaborator is injected. A validator never fails: fetch errors,
/// empty pages and missing or failing models all degrade to the documented
/// default sub-scores.
pub struct UrlValidator<F> {
    fetcher: F,
    relevance: RelevanceScorer,
    bias: BiasScorer,
    aggregator: Aggregator,
}

impl<F> std::fmt::Debug for UrlValidator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlValidator")
            .field("relevance", &self.relevance)
            .field("bias", &self.bias)
            .field("aggregator", &self.aggregator)
            .finish()
    }
}

impl<F: PageFetcher> UrlValidator<F> {
    pub fn new(
        fetcher: F,
        relevance: RelevanceScorer,
        bias: BiasScorer,
        aggregator: Aggregator,
    ) -> Self {
        Self {
            fetcher,
            relevance,
            bias,
            aggregator,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Rates how valid `url` is as a source for `query`.
    pub async fn rate(&self, query: &str, url: &str) -> ScoreResult {
        self.assess(query, url).await.score
    }

    /// Same as [`rate`](Self::rate), also reporting fetch outcome.
    pub async fn assess(&self, query: &str, url: &str) -> Assessment {
        let (content, fetch_error) = match self.fetcher.fetch_text(url).await {
            Ok(content) => (content, None),
            Err(e) => {
                warn!(url, error = %e, "Fetch failed, scoring page as empty");
                (String::new(), Some(e.to_string()))
            }
        };

        let content_chars = content.trim().chars().count();
        if content_chars == 0 && fetch_error.is_none() {
            warn!(url, "No paragraph text extracted");
        }

        let score = self.rate_content(query, &content);

        info!(
            url,
            relevance = score.content_relevance,
            bias = score.bias_score,
            final_score = score.final_validity_score,
            "Rated url"
        );

        Assessment {
            score,
            content_chars,
            fetch_error,
        }
    }

    /// Scores already-fetched page text.
    pub fn rate_content(&self, query: &str, content: &str) -> ScoreResult {
        if content.trim().is_empty() {
            debug!("Empty content, returning fallback score");
            return self.aggregator.fallback();
        }

        let relevance = self.relevance.score(query, content);
        let bias = self.bias.score(content);

        self.aggregator.combine(relevance, bias)
    }
}
