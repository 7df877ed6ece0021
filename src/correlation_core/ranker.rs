//! Ranking of pair results by correlation magnitude

use super::types::CorrelationResult;
use std::cmp::Ordering;

/// Order results strongest-first
///
/// Results with an absent coefficient sort after every present one. The sort is stable,
/// so ties and absent results keep their incoming order.
pub fn sort_by_magnitude(results: &mut [CorrelationResult]) {
    results.sort_by(|a, b| match (a.coefficient, b.coefficient) {
        (Some(ra), Some(rb)) => rb.abs().total_cmp(&ra.abs()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sort strongest-first and keep at most `max_count` results
pub fn rank(mut results: Vec<CorrelationResult>, max_count: usize) -> Vec<CorrelationResult> {
    sort_by_magnitude(&mut results);
    results.truncate(max_count);
    results
}
