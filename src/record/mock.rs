use std::sync::Mutex;

use super::Recorder;
use super::error::RecordError;
use super::model::EvaluationRow;

/// Keeps appended rows in memory.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    rows: Mutex<Vec<EvaluationRow>>,
    appends: Mutex<usize>,
    fail: bool,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `rows` already stored.
    pub fn with_rows(rows: Vec<EvaluationRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Every `append` fails with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<EvaluationRow> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `append` calls that succeeded.
    pub fn append_count(&self) -> usize {
        *self.appends.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Recorder for MemoryRecorder {
    fn append(&self, rows: &[EvaluationRow]) -> Result<(), RecordError> {
        if self.fail {
            return Err(RecordError::io(
                "memory",
                std::io::Error::other("simulated write failure"),
            ));
        }

        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(rows);
        *self.appends.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
