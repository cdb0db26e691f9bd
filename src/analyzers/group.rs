use std::collections::BTreeMap;

use crate::record::CourseRecord;

/// Records partitioned by term, iterated in ascending term order.
pub type TermGrouping = BTreeMap<String, Vec<CourseRecord>>;

/// Partitions records by their exact `term` string.
///
/// Iterating the result visits terms in ascending lexicographic order,
/// which stands in for chronological order: term labels must sort
/// lexicographically in the order the terms actually happened, e.g.
/// `2021-1 < 2021-2 < 2022-1`. A labeling scheme that breaks this (say,
/// bare `9` vs `10`) will mis-order accumulation. Within a term, input
/// order is preserved.
pub fn group_by_term(records: &[CourseRecord]) -> TermGrouping {
    let mut grouping = TermGrouping::new();
    for record in records {
        grouping
            .entry(record.term.clone())
            .or_default()
            .push(record.clone());
    }
    grouping
}
