use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

/// One attempt at one course in one term, as stored in the data CSV.
///
/// `code` identifies "the same course" across repeated attempts; `grade` is
/// kept exactly as supplied and matched case-insensitively after trimming.
/// Field order matches the CSV columns `semester,code,name,credits,grade`.
///
/// Records are value objects: aggregation never mutates one. Editing a
/// record means replacing it in the caller's collection and recomputing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "semester")]
    pub term: String,
    pub code: String,
    #[serde(rename = "name")]
    pub title: String,
    pub credits: i32,
    pub grade: String,
}

impl CourseRecord {
    pub fn new(term: &str, code: &str, title: &str, credits: i32, grade: &str) -> Self {
        CourseRecord {
            term: term.to_string(),
            code: code.to_string(),
            title: title.to_string(),
            credits,
            grade: grade.to_string(),
        }
    }

    /// Checks the credit invariant (`credits > 0`).
    ///
    /// Run at ingestion: a non-positive credit value is a data error to fix,
    /// not a weight to silently zero out.
    pub fn validate(&self) -> Result<(), TranscriptError> {
        if self.credits <= 0 {
            return Err(TranscriptError::InvalidCredit {
                code: self.code.clone(),
                credits: self.credits,
            });
        }
        Ok(())
    }
}
