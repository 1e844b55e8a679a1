use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CUSTOM_RATING, MIN_CUSTOM_RATING};

use super::error::RecordError;

/// Column order of the output table.
pub const HEADER: [&str; 4] = ["user_prompt", "url_to_check", "func_rating", "custom_rating"];

/// Column order of a batch input file.
pub const REQUEST_HEADER: [&str; 3] = ["user_prompt", "url_to_check", "custom_rating"];

/// One line of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub user_prompt: String,
    pub url_to_check: String,
    /// The computed `final_validity_score`.
    pub func_rating: f64,
    /// Human rating, 1-5.
    pub custom_rating: u8,
}

/// One (prompt, url, human rating) triple to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub user_prompt: String,
    pub url_to_check: String,
    pub custom_rating: u8,
}

impl EvaluationRequest {
    /// Builds a request, rejecting ratings outside 1-5.
    pub fn new(
        user_prompt: impl Into<String>,
        url_to_check: impl Into<String>,
        custom_rating: u8,
    ) -> Result<Self, RecordError> {
        validate_rating(0, i64::from(custom_rating))?;
        Ok(Self {
            user_prompt: user_prompt.into(),
            url_to_check: url_to_check.into(),
            custom_rating,
        })
    }

    pub fn into_row(self, func_rating: f64) -> EvaluationRow {
        EvaluationRow {
            user_prompt: self.user_prompt,
            url_to_check: self.url_to_check,
            func_rating,
            custom_rating: self.custom_rating,
        }
    }
}

/// `row` is the 1-based data row, used in the error only.
pub(crate) fn validate_rating(row: usize, rating: i64) -> Result<u8, RecordError> {
    if (i64::from(MIN_CUSTOM_RATING)..=i64::from(MAX_CUSTOM_RATING)).contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(RecordError::InvalidRating {
            row,
            rating,
            min: MIN_CUSTOM_RATING,
            max: MAX_CUSTOM_RATING,
        })
    }
}
