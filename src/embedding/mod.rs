//! Embedding + model utilities.
//!
//! - [`sentence`] provides query/page embeddings for relevance scoring.
//! - [`sentiment`] provides the classifier behind bias scoring.
//! - [`capability`] holds the traits [`crate::scoring`] depends on.

/// BERT encoder and classifier wrappers.
pub mod bert;
/// Memoizing embedder wrapper.
pub mod cache;
/// Embedder / classifier capability traits.
pub mod capability;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Sentence embedder.
pub mod sentence;
/// Sentiment classifier.
pub mod sentiment;
/// Tokenizer/model loading helpers.
pub mod utils;


pub use cache::CachedEmbedder;
pub use capability::{
    Classification, Sentiment, SentimentClassifier, TextEmbedder, cosine_similarity,
};
pub use error::EmbeddingError;
pub use sentence::{
    SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder, SentenceEmbedderConfig,
};
pub use sentiment::{CLASSIFIER_MAX_SEQ_LEN, ClassifierConfig, SequenceClassifier};
