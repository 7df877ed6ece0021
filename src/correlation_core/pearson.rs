//! Pearson correlation coefficient over a paired sample

use super::sampler::PairedSample;

/// Pearson's r for a paired sample
///
/// Returns `None` when fewer than two pairs exist. When either side is constant the
/// denominator is zero and the coefficient is defined as `0.0`. The result is clamped
/// to `[-1, 1]`.
///
/// Sums are accumulated as integers so the degenerate case is detected exactly.
pub fn pearson(sample: &PairedSample) -> Option<f64> {
    let n = sample.len();
    if n < 2 {
        return None;
    }

    let mut sum_x: i64 = 0;
    let mut sum_y: i64 = 0;
    let mut sum_xy: i64 = 0;
    let mut sum_x2: i64 = 0;
    let mut sum_y2: i64 = 0;

    for (x, y) in sample.pairs() {
        let (x, y) = (i64::from(x), i64::from(y));
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let n = n as i64;
    let spread_x = n * sum_x2 - sum_x * sum_x;
    let spread_y = n * sum_y2 - sum_y * sum_y;

    // Constant column
    if spread_x == 0 || spread_y == 0 {
        return Some(0.0);
    }

    let numerator = (n * sum_xy - sum_x * sum_y) as f64;
    let denominator = (spread_x as f64 * spread_y as f64).sqrt();

    Some((numerator / denominator).clamp(-1.0, 1.0))
}
