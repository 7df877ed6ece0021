//! Scatter aggregation: collapse a paired sample into counted coordinates

use super::sampler::PairedSample;
use super::types::ScatterPoint;
use std::collections::BTreeMap;

/// Group identical `(x, y)` pairs and count them
///
/// Counts sum to the sample size and coordinates are distinct. Points come out in
/// coordinate order, though callers should not rely on any order.
pub fn scatter_points(sample: &PairedSample) -> Vec<ScatterPoint> {
    let mut counts: BTreeMap<(u8, u8), usize> = BTreeMap::new();

    for coordinate in sample.pairs() {
        *counts.entry(coordinate).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((x, y), count)| ScatterPoint { x, y, count })
        .collect()
}
