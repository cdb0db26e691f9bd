//! Best-attempt resolution for repeated courses.

use std::collections::HashMap;

use crate::error::TranscriptError;
use crate::record::CourseRecord;

use super::classify::GradingConfig;

/// Running best-attempt map: at most one counted attempt per course code,
/// the one with the highest grade point seen so far.
///
/// The cumulative average and the cumulative credit sum are both read off
/// this one state, so the two series can never disagree about which
/// attempt won a course.
#[derive(Debug)]
pub struct BestAttempts {
    config: GradingConfig,
    best: HashMap<String, ScoredAttempt>,
    order: Vec<String>,
}

#[derive(Debug)]
struct ScoredAttempt {
    record: CourseRecord,
    points: f64,
}

impl BestAttempts {
    pub fn new(config: GradingConfig) -> Self {
        BestAttempts {
            config,
            best: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Feeds one record into the running resolution.
    ///
    /// Records with a blank code or an excluded grade are ignored; they
    /// neither appear in the result nor block other attempts of the same
    /// code. A later attempt replaces the current best only when its grade
    /// point is strictly higher, so ties keep the earlier attempt.
    ///
    /// # Errors
    ///
    /// Fails with [`TranscriptError::InvalidGrade`] when a counted record's
    /// grade cannot be mapped; the resolution state is left as it was
    /// before the offending record.
    pub fn observe(&mut self, record: &CourseRecord) -> Result<(), TranscriptError> {
        let code = record.code.trim();
        if code.is_empty() {
            return Ok(());
        }
        if self.config.is_excluded(&record.grade) {
            return Ok(());
        }
        let points = self.config.grade_point(&record.grade)?;

        match self.best.get_mut(code) {
            Some(current) => {
                if points > current.points {
                    current.record = record.clone();
                    current.points = points;
                }
            }
            None => {
                self.order.push(code.to_string());
                self.best.insert(
                    code.to_string(),
                    ScoredAttempt {
                        record: record.clone(),
                        points,
                    },
                );
            }
        }
        Ok(())
    }

    /// Resolved attempts in first-seen code order.
    pub fn records(&self) -> impl Iterator<Item = &CourseRecord> {
        self.order
            .iter()
            .filter_map(|code| self.best.get(code))
            .map(|attempt| &attempt.record)
    }

    /// Credit-weighted grade-point average over the resolved attempts;
    /// 0.0 when nothing has counted yet.
    pub fn average(&self) -> f64 {
        let mut total_points = 0.0;
        let mut total_credits = 0i64;
        for attempt in self.best.values() {
            total_points += attempt.points * attempt.record.credits as f64;
            total_credits += attempt.record.credits as i64;
        }
        if total_credits == 0 {
            0.0
        } else {
            total_points / total_credits as f64
        }
    }

    /// Sum of credits over resolved attempts with a passing grade point.
    /// A failed best attempt is deduplicated like any other but earns
    /// nothing.
    pub fn passing_credits(&self) -> i32 {
        self.best
            .values()
            .filter(|attempt| attempt.points > 0.0)
            .map(|attempt| attempt.record.credits)
            .sum()
    }
}

/// Resolves a record slice to at most one counted attempt per course code,
/// returned in first-seen code order.
pub fn resolve_best(
    records: &[CourseRecord],
    config: GradingConfig,
) -> Result<Vec<CourseRecord>, TranscriptError> {
    let mut attempts = BestAttempts::new(config);
    for record in records {
        attempts.observe(record)?;
    }
    Ok(attempts.records().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::classify::{GradePolicy, GradingConfig};
    use crate::analyzers::grade::GradeScale;

    fn rec(code: &str, credits: i32, grade: &str) -> CourseRecord {
        CourseRecord::new("2021-1", code, "", credits, grade)
    }

    #[test]
    fn test_best_grade_wins_regardless_of_order() {
        let config = GradingConfig::default();
        let upgraded = resolve_best(&[rec("C1", 3, "B"), rec("C1", 3, "A")], config).unwrap();
        assert_eq!(upgraded, vec![rec("C1", 3, "A")]);

        let downgraded = resolve_best(&[rec("C1", 3, "A"), rec("C1", 3, "B")], config).unwrap();
        assert_eq!(downgraded, vec![rec("C1", 3, "A")]);
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let config = GradingConfig::default();
        let first = CourseRecord::new("2021-1", "C1", "first", 3, "B");
        let second = CourseRecord::new("2021-2", "C1", "second", 3, "B");
        let resolved = resolve_best(&[first.clone(), second], config).unwrap();
        assert_eq!(resolved, vec![first]);
    }

    #[test]
    fn test_blank_codes_are_skipped() {
        let config = GradingConfig::default();
        let resolved =
            resolve_best(&[rec("", 3, "A"), rec("  ", 2, "B"), rec("C1", 3, "C")], config).unwrap();
        assert_eq!(resolved, vec![rec("C1", 3, "C")]);
    }

    #[test]
    fn test_excluded_only_code_contributes_nothing() {
        let config = GradingConfig::default();
        let resolved = resolve_best(&[rec("C1", 3, "W"), rec("C2", 3, "A")], config).unwrap();
        assert_eq!(resolved, vec![rec("C2", 3, "A")]);
    }

    #[test]
    fn test_excluded_attempt_does_not_shadow_graded_one() {
        let config = GradingConfig::default();
        let resolved = resolve_best(&[rec("C1", 3, "W"), rec("C1", 3, "C")], config).unwrap();
        assert_eq!(resolved, vec![rec("C1", 3, "C")]);
    }

    #[test]
    fn test_result_in_first_seen_code_order() {
        let config = GradingConfig::default();
        let resolved = resolve_best(
            &[rec("C2", 3, "B"), rec("C1", 3, "A"), rec("C2", 3, "A")],
            config,
        )
        .unwrap();
        let codes: Vec<&str> = resolved.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["C2", "C1"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let config = GradingConfig::default();
        let records = vec![
            rec("C1", 3, "B"),
            rec("C2", 2, "A"),
            rec("C1", 3, "A"),
            rec("C3", 4, "F"),
        ];
        let once = resolve_best(&records, config).unwrap();
        let twice = resolve_best(&once, config).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_average_and_passing_credits_share_resolution() {
        let mut attempts = BestAttempts::new(GradingConfig::default());
        for record in [rec("C1", 3, "B"), rec("C1", 3, "A"), rec("C2", 4, "F")] {
            attempts.observe(&record).unwrap();
        }
        // C1 resolved to A: (3*4.0 + 4*0.0) / 7
        assert_eq!(attempts.average(), 12.0 / 7.0);
        assert_eq!(attempts.passing_credits(), 3);
    }

    #[test]
    fn test_invalid_counted_grade_propagates() {
        let config = GradingConfig::new(GradePolicy::ExclusionList, GradeScale::LetterOnly);
        assert!(resolve_best(&[rec("C1", 3, "??")], config).is_err());
    }
}
