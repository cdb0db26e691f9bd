//! Series and report types produced by the aggregation walk.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One GPA or CPA sample on the term axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermValue {
    pub term: String,
    pub value: f64,
}

/// Cumulative earned credits up to and including a term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCredits {
    pub term: String,
    pub credits: i32,
}

/// Registered credits in one term, split by whether the course code had
/// already been registered before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCreditLoad {
    pub term: String,
    pub first_attempt: i32,
    pub repeated: i32,
}

/// Scalar GPA/CPA pair for a single term's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSummary {
    pub term: String,
    pub gpa: f64,
    pub cpa: f64,
}

/// Whole-transcript figures, independent of term selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub cpa: f64,
    pub earned_credits: i32,
}

/// Complete aggregation result for one transcript, serialized as JSON for
/// the charting frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptAggregate {
    pub generated_at: DateTime<Utc>,
    /// Selected terms in chronological order: the axis every series below
    /// is plotted against.
    pub terms: Vec<String>,
    pub gpa: Vec<TermValue>,
    pub cpa: Vec<TermValue>,
    pub cumulative_credits: Vec<TermCredits>,
    pub credit_load: Vec<TermCreditLoad>,
    pub overall: OverallSummary,
}
