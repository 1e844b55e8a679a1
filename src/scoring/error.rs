use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Reasons a sub-score fell back to its default, or a scorer was misconfigured.
///
/// Only the `try_*` scorer methods surface these; the validator logs them and
/// substitutes the documented default.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("model error: {0}")]
    Model(#[from] EmbeddingError),

    #[error("{component} is not available")]
    ModelUnavailable { component: &'static str },

    #[error("no content to score")]
    EmptyContent,

    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}
