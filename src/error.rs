//! Typed errors for record validation and aggregation.
//!
//! Aggregation is total over well-formed records; these two cases are the
//! only ways it fails, and both abort the whole computation rather than
//! producing a partial result.

use thiserror::Error;

/// Errors raised while validating or aggregating course records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A counted record carries a grade token outside the recognized
    /// vocabulary (and, with the numeric fallback enabled, outside 0-10).
    #[error("unrecognized grade {grade:?}")]
    InvalidGrade { grade: String },

    /// A record's credit value is not a positive integer. Rejected at
    /// ingestion so it never reaches aggregation.
    #[error("invalid credits {credits} for course {code}: must be positive")]
    InvalidCredit { code: String, credits: i32 },
}
