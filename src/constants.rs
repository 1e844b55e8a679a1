//! Cross-cutting, shared constants.
//!
//! Score constants are on the 0-100 scale used by [`crate::scoring::ScoreResult`].

use std::time::Duration;

/// Weight of content relevance in the final score (bias gets `1 - weight`).
pub const DEFAULT_RELEVANCE_WEIGHT: f64 = 0.5;

/// Relevance reported when there is no content or no embedder.
pub const FALLBACK_RELEVANCE: f64 = 0.0;

/// Bias reported when there is no content or no classifier.
pub const FALLBACK_BIAS: f64 = 50.0;

pub const POSITIVE_BIAS_SCORE: f64 = 100.0;
pub const NEUTRAL_BIAS_SCORE: f64 = 50.0;
pub const NEGATIVE_BIAS_SCORE: f64 = 30.0;

/// Characters of page text handed to the sentiment classifier.
pub const BIAS_INPUT_CHARS: usize = 512;

/// Per-request HTTP timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like user agent; several news sites refuse the reqwest default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default output table.
pub const DEFAULT_OUTPUT_PATH: &str = "./deliverable.csv";

/// Max distinct texts kept by [`crate::embedding::CachedEmbedder`].
pub const DEFAULT_EMBED_CACHE_CAPACITY: u64 = 1024;

/// Output dimension of the stub sentence embedder (matches MiniLM-class models).
pub const STUB_EMBEDDING_DIM: usize = 384;

/// Token budget for encoder models (BERT positional limit).
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Lowest and highest accepted human rating.
pub const MIN_CUSTOM_RATING: u8 = 1;
pub const MAX_CUSTOM_RATING: u8 = 5;
