use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::fetch::PageFetcher;
use crate::record::model::validate_rating;
use crate::record::{EvaluationRequest, EvaluationRow, REQUEST_HEADER, RecordError, Recorder};
use crate::scoring::UrlValidator;

/// Outcome of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Rows handed to the recorder.
    pub rows: usize,
    /// Pairs scored as empty pages (fetch failure or no paragraph text).
    pub degraded: usize,
}

/// Rates a sequence of requests and records the results.
#[derive(Debug)]
pub struct BatchRunner<F, R> {
    validator: UrlValidator<F>,
    recorder: R,
}

impl<F: PageFetcher, R: Recorder> BatchRunner<F, R> {
    pub fn new(validator: UrlValidator<F>, recorder: R) -> Self {
        Self {
            validator,
            recorder,
        }
    }

    pub fn validator(&self) -> &UrlValidator<F> {
        &self.validator
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Rates every request in order, then appends all rows in one call.
    ///
    /// Scoring never aborts the batch; only a recorder error does, in which
    /// case nothing is written.
    pub async fn run<I>(&self, requests: I) -> Result<BatchSummary, RecordError>
    where
        I: IntoIterator<Item = EvaluationRequest>,
    {
        let mut rows: Vec<EvaluationRow> = Vec::new();
        let mut summary = BatchSummary::default();

        for request in requests {
            let assessment = self
                .validator
                .assess(&request.user_prompt, &request.url_to_check)
                .await;
            if assessment.is_degraded() {
                summary.degraded += 1;
            }

            debug!(
                index = rows.len(),
                url = %request.url_to_check,
                score = %assessment.score,
                "Evaluated request"
            );
            rows.push(request.into_row(assessment.score.final_validity_score));
        }

        self.recorder.append(&rows)?;
        summary.rows = rows.len();

        info!(
            rows = summary.rows,
            degraded = summary.degraded,
            "Batch complete"
        );
        Ok(summary)
    }
}

#[derive(Deserialize)]
struct RawRequest {
    user_prompt: String,
    url_to_check: String,
    custom_rating: i64,
}

/// Loads batch input from a CSV with header `user_prompt,url_to_check,custom_rating`.
pub fn read_requests(path: &Path) -> Result<Vec<EvaluationRequest>, RecordError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| RecordError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| RecordError::csv(path, e))?;
    if headers.iter().ne(REQUEST_HEADER) {
        return Err(RecordError::HeaderMismatch {
            path: path.to_path_buf(),
            expected: REQUEST_HEADER.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    reader
        .deserialize::<RawRequest>()
        .enumerate()
        .map(|(idx, record)| {
            let raw = record.map_err(|e| RecordError::csv(path, e))?;
            Ok(EvaluationRequest {
                custom_rating: validate_rating(idx + 1, raw.custom_rating)?,
                user_prompt: raw.user_prompt,
                url_to_check: raw.url_to_check,
            })
        })
        .collect()
}
