use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the evaluation table.
///
/// Unlike scoring errors these are fatal for a batch.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("header mismatch in '{path}': expected '{expected}', found '{found}'")]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("custom_rating {rating} out of range [{min}, {max}] (row {row})")]
    InvalidRating { row: usize, rating: i64, min: u8, max: u8 },
}

impl RecordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        RecordError::Csv {
            path: path.into(),
            source,
        }
    }
}
