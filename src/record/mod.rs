//! The evaluation table: rows of (prompt, url, computed rating, human rating).

pub mod csv;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use self::csv::CsvRecorder;
pub use error::RecordError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryRecorder;
pub use model::{EvaluationRequest, EvaluationRow, HEADER, REQUEST_HEADER};

/// Append-only sink for evaluation rows.
pub trait Recorder: Send + Sync {
    /// Appends `rows` after everything already stored, in order.
    fn append(&self, rows: &[EvaluationRow]) -> Result<(), RecordError>;
}

impl<T: Recorder + ?Sized> Recorder for std::sync::Arc<T> {
    fn append(&self, rows: &[EvaluationRow]) -> Result<(), RecordError> {
        (**self).append(rows)
    }
}
