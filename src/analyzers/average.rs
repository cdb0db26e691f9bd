use crate::error::TranscriptError;
use crate::record::CourseRecord;

use super::classify::GradingConfig;

/// Credit-weighted grade-point average over `records`.
///
/// Excluded grades contribute neither points nor credits; an empty or
/// all-excluded input yields 0.0 rather than dividing by zero.
///
/// # Errors
///
/// Fails with [`TranscriptError::InvalidGrade`] on the first counted
/// record whose grade the scale cannot map; no partial average is
/// produced.
pub fn weighted_average(
    records: &[CourseRecord],
    config: GradingConfig,
) -> Result<f64, TranscriptError> {
    let mut total_points = 0.0;
    let mut total_credits = 0i64;

    for record in records {
        if config.is_excluded(&record.grade) {
            continue;
        }
        total_points += config.grade_point(&record.grade)? * record.credits as f64;
        total_credits += record.credits as i64;
    }

    if total_credits == 0 {
        Ok(0.0)
    } else {
        Ok(total_points / total_credits as f64)
    }
}
