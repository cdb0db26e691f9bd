//! Which grade tokens count toward an average.

use crate::error::TranscriptError;

use super::grade::GradeScale;

/// The nine letter grades that always count toward averages.
pub const LETTER_GRADES: [&str; 9] = ["A+", "A", "B+", "B", "C+", "C", "D+", "D", "F"];

/// Markers for attempts that never count: withdrawn, audit, incomplete,
/// in progress (not yet graded).
pub const EXCLUSION_MARKERS: [&str; 4] = ["W", "AU", "I", "IP"];

/// Which records are excluded from every average.
///
/// The two policies disagree on tokens outside both the letter set and the
/// marker set: an unknown token is excluded under [`GradePolicy::StrictLetters`]
/// but counted (and possibly unmappable) under [`GradePolicy::ExclusionList`].
/// The choice is therefore always an explicit parameter, never implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradePolicy {
    /// Only the nine standard letter grades count.
    #[default]
    StrictLetters,
    /// Everything counts except blanks and the four exclusion markers.
    ExclusionList,
}

impl GradePolicy {
    /// Returns true when `grade` contributes neither credits nor grade
    /// points to any average. Blank tokens are always excluded.
    pub fn is_excluded(&self, grade: &str) -> bool {
        let token = grade.trim().to_uppercase();
        if token.is_empty() {
            return true;
        }
        match self {
            GradePolicy::StrictLetters => !LETTER_GRADES.contains(&token.as_str()),
            GradePolicy::ExclusionList => EXCLUSION_MARKERS.contains(&token.as_str()),
        }
    }
}

/// Classification policy and grade scale for one aggregation run.
///
/// Every engine entry point takes this explicitly; there is no global
/// default hiding the choice. `Default` (strict letters, letter-only
/// scale) exists for callers that want the historical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradingConfig {
    pub policy: GradePolicy,
    pub scale: GradeScale,
}

impl GradingConfig {
    pub fn new(policy: GradePolicy, scale: GradeScale) -> Self {
        GradingConfig { policy, scale }
    }

    /// See [`GradePolicy::is_excluded`].
    pub fn is_excluded(&self, grade: &str) -> bool {
        self.policy.is_excluded(grade)
    }

    /// See [`GradeScale::grade_point`].
    pub fn grade_point(&self, grade: &str) -> Result<f64, TranscriptError> {
        self.scale.grade_point(grade)
    }

    /// True for counted grades worth more than 0.0 points. `F` still enters
    /// averages but is never passing; excluded grades are never passing.
    ///
    /// # Errors
    ///
    /// Propagates [`TranscriptError::InvalidGrade`] for a counted token the
    /// scale cannot map (reachable only under [`GradePolicy::ExclusionList`]).
    pub fn is_passing(&self, grade: &str) -> Result<bool, TranscriptError> {
        if self.is_excluded(grade) {
            return Ok(false);
        }
        Ok(self.grade_point(grade)? > 0.0)
    }
}
