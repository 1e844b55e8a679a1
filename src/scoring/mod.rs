//! Relevance, bias and the combined validity score.
//!
//! [`UrlValidator`] wires a [`PageFetcher`](crate::fetch::PageFetcher) to a
//! [`RelevanceScorer`] and a [`BiasScorer`] and combines their outputs with an
//! [`Aggregator`].
//!
//! # Fallbacks
//!
//! | Condition                     | content_relevance | bias_score |
//! |-------------------------------|-------------------|------------|
//! | fetch failed / no `<p>` text  | 0                 | 50         |
//! | no embedder / embedder error  | 0                 | (scored)   |
//! | no classifier / classifier error | (scored)       | 50         |
//!
//! With the default 50/50 weights an empty page therefore scores `25.0`.

pub mod aggregate;
pub mod bias;
pub mod error;
pub mod relevance;
pub mod types;
pub mod validator;


pub use aggregate::Aggregator;
pub use bias::{BiasScorer, bias_for_sentiment, truncate_chars};
pub use error::ScoringError;
pub use relevance::{RelevanceScorer, similarity_to_score};
pub use types::{Assessment, ScoreResult};
pub use validator::UrlValidator;
