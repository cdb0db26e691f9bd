//! Per-term and cumulative series over a term grouping.
//!
//! Every walk visits terms in chronological (ascending lexicographic)
//! order. A term selection restricts which terms are emitted, never which
//! terms feed accumulation: CPA at term T always reflects every attempt
//! up to and including T.

use std::collections::HashSet;

use chrono::Utc;

use crate::error::TranscriptError;
use crate::record::CourseRecord;

use super::average::weighted_average;
use super::classify::GradingConfig;
use super::group::{TermGrouping, group_by_term};
use super::resolve::BestAttempts;
use super::types::{
    OverallSummary, TermCreditLoad, TermCredits, TermSummary, TermValue, TranscriptAggregate,
};

/// Per-term GPA for each selected term.
///
/// Terms are independent: no attempt resolution and no carry-over, so only
/// the selected terms' records are ever touched.
pub fn gpa_by_term(
    grouping: &TermGrouping,
    selected: &HashSet<String>,
    config: GradingConfig,
) -> Result<Vec<TermValue>, TranscriptError> {
    let mut series = Vec::new();
    for (term, records) in grouping {
        if !selected.contains(term) {
            continue;
        }
        series.push(TermValue {
            term: term.clone(),
            value: weighted_average(records, config)?,
        });
    }
    Ok(series)
}

/// Cumulative GPA (CPA) up to and including each selected term.
///
/// All terms feed the running best-attempt map, selected or not; repeated
/// attempts are deduplicated to their best grade before averaging.
pub fn cpa_by_term(
    grouping: &TermGrouping,
    selected: &HashSet<String>,
    config: GradingConfig,
) -> Result<Vec<TermValue>, TranscriptError> {
    let mut attempts = BestAttempts::new(config);
    let mut series = Vec::new();
    for (term, records) in grouping {
        for record in records {
            attempts.observe(record)?;
        }
        if selected.contains(term) {
            series.push(TermValue {
                term: term.clone(),
                value: attempts.average(),
            });
        }
    }
    Ok(series)
}

/// Cumulative earned credits up to and including each selected term.
///
/// Each course code earns its credits once, at its best grade, and only
/// while that best grade is passing: a course failed everywhere resolves
/// like any other but adds nothing.
pub fn cumulative_credits_by_term(
    grouping: &TermGrouping,
    selected: &HashSet<String>,
    config: GradingConfig,
) -> Result<Vec<TermCredits>, TranscriptError> {
    let mut attempts = BestAttempts::new(config);
    let mut series = Vec::new();
    for (term, records) in grouping {
        for record in records {
            attempts.observe(record)?;
        }
        if selected.contains(term) {
            series.push(TermCredits {
                term: term.clone(),
                credits: attempts.passing_credits(),
            });
        }
    }
    Ok(series)
}

/// Per-term registered credit split for each selected term.
///
/// The first registration of a course code counts as `first_attempt`, any
/// later registration as `repeated`. Grades play no part here, so
/// withdrawn or not-yet-graded attempts still show up in the load; records
/// with a blank code are ignored. Total, never fails.
pub fn credit_load_by_term(
    grouping: &TermGrouping,
    selected: &HashSet<String>,
) -> Vec<TermCreditLoad> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut series = Vec::new();
    for (term, records) in grouping {
        let mut first_attempt = 0;
        let mut repeated = 0;
        for record in records {
            let code = record.code.trim();
            if code.is_empty() {
                continue;
            }
            if seen.contains(code) {
                repeated += record.credits;
            } else {
                first_attempt += record.credits;
                seen.insert(code.to_string());
            }
        }
        if selected.contains(term) {
            series.push(TermCreditLoad {
                term: term.clone(),
                first_attempt,
                repeated,
            });
        }
    }
    series
}

/// GPA and cumulative-through CPA for one term, or `None` when the
/// grouping holds no such term.
pub fn term_summary(
    grouping: &TermGrouping,
    term: &str,
    config: GradingConfig,
) -> Result<Option<TermSummary>, TranscriptError> {
    let Some(records) = grouping.get(term) else {
        return Ok(None);
    };
    let gpa = weighted_average(records, config)?;

    let mut attempts = BestAttempts::new(config);
    for (walked, walked_records) in grouping {
        for record in walked_records {
            attempts.observe(record)?;
        }
        if walked == term {
            break;
        }
    }

    Ok(Some(TermSummary {
        term: term.to_string(),
        gpa,
        cpa: attempts.average(),
    }))
}

/// Groups `records`, runs every series, and assembles the charting report.
///
/// `selected` restricts which terms appear on the series axes; `None`
/// emits every term. The overall figures always cover the whole
/// transcript.
pub fn aggregate_transcript(
    records: &[CourseRecord],
    selected: Option<&HashSet<String>>,
    config: GradingConfig,
) -> Result<TranscriptAggregate, TranscriptError> {
    let grouping = group_by_term(records);

    let all_terms: HashSet<String> = grouping.keys().cloned().collect();
    let selected = selected.unwrap_or(&all_terms);

    let mut attempts = BestAttempts::new(config);
    for term_records in grouping.values() {
        for record in term_records {
            attempts.observe(record)?;
        }
    }

    Ok(TranscriptAggregate {
        generated_at: Utc::now(),
        terms: grouping
            .keys()
            .filter(|term| selected.contains(*term))
            .cloned()
            .collect(),
        gpa: gpa_by_term(&grouping, selected, config)?,
        cpa: cpa_by_term(&grouping, selected, config)?,
        cumulative_credits: cumulative_credits_by_term(&grouping, selected, config)?,
        credit_load: credit_load_by_term(&grouping, selected),
        overall: OverallSummary {
            cpa: attempts.average(),
            earned_credits: attempts.passing_credits(),
        },
    })
}
