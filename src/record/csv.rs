use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::Recorder;
use super::error::RecordError;
use super::model::{EvaluationRow, HEADER, validate_rating};

/// Evaluation table stored as a CSV file.
///
/// Appending rewrites the whole file in one rename. Prior rows are validated
/// and copied through as stored, with the new rows after them.
#[derive(Debug, Clone)]
pub struct CsvRecorder {
    output_path: PathBuf,
    prior_path: Option<PathBuf>,
}

impl CsvRecorder {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            prior_path: None,
        }
    }

    /// Reads prior rows from `prior_path` instead of the output file.
    pub fn with_prior_path(mut self, prior_path: impl Into<PathBuf>) -> Self {
        self.prior_path = Some(prior_path.into());
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn prior_path(&self) -> Option<&Path> {
        self.prior_path.as_deref()
    }

    /// Loads every row of `path`. A missing or empty file has no rows.
    pub fn read_rows(path: &Path) -> Result<Vec<EvaluationRow>, RecordError> {
        Ok(Self::read_table(path)?
            .into_iter()
            .map(|(_, row)| row)
            .collect())
    }

    /// Validated rows of `path`, each paired with its record as stored.
    fn read_table(path: &Path) -> Result<Vec<(StringRecord, EvaluationRow)>, RecordError> {
        if !path.exists() {
            debug!(path = %path.display(), "No prior table");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| RecordError::csv(path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| RecordError::csv(path, e))?
            .clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(HEADER) {
            return Err(RecordError::HeaderMismatch {
                path: path.to_path_buf(),
                expected: HEADER.join(","),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut table = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| RecordError::csv(path, e))?;
            let row: EvaluationRow = record
                .deserialize(Some(&headers))
                .map_err(|e| RecordError::csv(path, e))?;
            validate_rating(idx + 1, i64::from(row.custom_rating))?;
            table.push((record, row));
        }

        Ok(table)
    }

    /// Writes `prior` verbatim, then `rows`, replacing the output file.
    fn write_table(&self, prior: &[StringRecord], rows: &[EvaluationRow]) -> Result<(), RecordError> {
        let path = &self.output_path;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| RecordError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RecordError::io(dir, e))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            writer
                .write_record(HEADER)
                .map_err(|e| RecordError::csv(path, e))?;
            for record in prior {
                writer
                    .write_record(record)
                    .map_err(|e| RecordError::csv(path, e))?;
            }
            for row in rows {
                writer
                    .serialize(row)
                    .map_err(|e| RecordError::csv(path, e))?;
            }
            writer.flush().map_err(|e| RecordError::io(path, e))?;
        }
        tmp.as_file_mut()
            .sync_all()
            .map_err(|e| RecordError::io(path, e))?;

        tmp.persist(path)
            .map_err(|e| RecordError::io(path, e.error))?;
        Ok(())
    }
}

impl Recorder for CsvRecorder {
    fn append(&self, rows: &[EvaluationRow]) -> Result<(), RecordError> {
        let source = self.prior_path.as_deref().unwrap_or(&self.output_path);
        let prior: Vec<StringRecord> = Self::read_table(source)?
            .into_iter()
            .map(|(record, _)| record)
            .collect();
        let prior_rows = prior.len();

        self.write_table(&prior, rows)?;

        info!(
            path = %self.output_path.display(),
            prior_rows,
            new_rows = rows.len(),
            "Appended evaluation rows"
        );
        Ok(())
    }
}
