//! URL validity scoring library (used by the CLI and integration tests).
//!
//! Rates how good a web page is as a source for a question: the page's
//! paragraph text is compared to the question with sentence embeddings
//! (relevance) and run through a sentiment classifier (bias), and the two
//! sub-scores are averaged into a final validity score on a 0-100 scale.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`UrlValidator`], [`ScoreResult`], [`Assessment`] - One (query, URL) rating
//! - [`RelevanceScorer`], [`BiasScorer`], [`Aggregator`] - The scoring stages
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Collaborators
//! - [`PageFetcher`], [`HttpFetcher`] - Page download and `<p>` extraction
//! - [`TextEmbedder`], [`SentenceEmbedder`], [`CachedEmbedder`] - Embeddings
//! - [`SentimentClassifier`], [`SequenceClassifier`] - Sentiment labels
//! - [`Recorder`], [`CsvRecorder`] - The evaluation table
//!
//! ## Batch
//! - [`BatchRunner`], [`BatchSummary`], [`read_requests`]
//!
//! ## Test/Mock Support
//! [`StaticFetcher`] and [`MemoryRecorder`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod fetch;
pub mod pipeline;
pub mod record;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use embedding::{
    CachedEmbedder, Classification, ClassifierConfig, EmbeddingError, SentenceEmbedder,
    SentenceEmbedderConfig, Sentiment, SentimentClassifier, SequenceClassifier, TextEmbedder,
    cosine_similarity,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::StaticFetcher;
pub use fetch::{FetchConfig, FetchError, HttpFetcher, PageFetcher, extract_paragraph_text};
pub use pipeline::{BatchRunner, BatchSummary, read_requests};
#[cfg(any(test, feature = "mock"))]
pub use record::MemoryRecorder;
pub use record::{CsvRecorder, EvaluationRequest, EvaluationRow, RecordError, Recorder};
pub use scoring::{
    Aggregator, Assessment, BiasScorer, RelevanceScorer, ScoreResult, ScoringError, UrlValidator,
};
