//! Plain-text rendering of correlation results

use super::types::{CorrelationResult, Direction, Strength};

/// Below this many paired answers a result is flagged as tentative
pub const TENTATIVE_SAMPLE_SIZE: usize = 10;

/// Proportion of variance shared by the pair (r²)
pub fn shared_variance(result: &CorrelationResult) -> Option<f64> {
    result.coefficient.map(|r| r * r)
}

pub fn is_tentative(result: &CorrelationResult) -> bool {
    result.sample_size < TENTATIVE_SAMPLE_SIZE
}

/// One-sentence reading of a result
pub fn interpretation(result: &CorrelationResult) -> String {
    let a = &result.variable1_label;
    let b = &result.variable2_label;
    let positive = result.direction != Direction::Negative;

    match result.strength {
        Strength::Strong if positive => format!(
            "Strong positive relationship! People who rated {} higher \
             also tended to rate {} higher.",
            a, b
        ),
        Strength::Strong => format!(
            "Strong negative relationship! People who rated {} higher tended to rate {} lower.",
            a, b
        ),
        Strength::Moderate if positive => format!(
            "Moderate positive trend: higher {} tends to go with higher {}.",
            a, b
        ),
        Strength::Moderate => format!(
            "Moderate negative trend: higher {} tends to go with lower {}.",
            a, b
        ),
        Strength::Weak if positive => format!(
            "Slight positive tendency between {} and {}, but the relationship is weak.",
            a, b
        ),
        Strength::Weak => format!(
            "Slight negative tendency between {} and {}, but the relationship is weak.",
            a, b
        ),
        Strength::None if result.coefficient.is_none() => format!(
            "Not enough overlapping answers yet to relate {} and {}.",
            a, b
        ),
        Strength::None => format!(
            "No meaningful correlation found: {} and {} appear to be independent.",
            a, b
        ),
    }
}

/// Multi-line block for one ranked result
pub fn render(rank: usize, result: &CorrelationResult) -> String {
    let coefficient = result
        .coefficient
        .map(|r| format!("{:+.2}", r))
        .unwrap_or_else(|| "n/a".to_string());
    let variance = shared_variance(result)
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string());

    let mut block = format!(
        "#{} {} ↔ {}\n   {} ({}) r = {}, r² = {}, n = {}\n   {}",
        rank,
        result.variable1_label,
        result.variable2_label,
        result.strength.label(),
        result.direction.as_str(),
        coefficient,
        variance,
        result.sample_size,
        interpretation(result)
    );

    if is_tentative(result) {
        block.push_str(&format!(
            "\n   ⚠️  Only {} paired answers; this may change as more data comes in.",
            result.sample_size
        ));
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_result(
        coefficient: Option<f64>,
        strength: Strength,
        direction: Direction,
        sample_size: usize,
    ) -> CorrelationResult {
        CorrelationResult {
            variable1_id: "sleepHours".to_string(),
            variable2_id: "moodRating".to_string(),
            variable1_label: "Sleep".to_string(),
            variable2_label: "Mood".to_string(),
            coefficient,
            strength,
            direction,
            sample_size,
            scatter_points: Vec::new(),
        }
    }

    #[test]
    fn test_shared_variance() {
        let result = create_test_result(Some(-0.5), Strength::Moderate, Direction::Negative, 20);
        assert_eq!(shared_variance(&result), Some(0.25));

        let result = create_test_result(None, Strength::None, Direction::None, 1);
        assert_eq!(shared_variance(&result), None);
    }

    #[test]
    fn test_interpretation_uses_direction() {
        let result = create_test_result(Some(0.8), Strength::Strong, Direction::Positive, 20);
        assert!(interpretation(&result).starts_with("Strong positive relationship!"));

        let result = create_test_result(Some(-0.8), Strength::Strong, Direction::Negative, 20);
        assert!(interpretation(&result).contains("rate Mood lower"));

        let result = create_test_result(Some(0.05), Strength::None, Direction::Positive, 20);
        assert!(interpretation(&result).contains("independent"));

        let result = create_test_result(None, Strength::None, Direction::None, 1);
        assert!(interpretation(&result).starts_with("Not enough"));
    }

    #[test]
    fn test_render_flags_small_samples() {
        let small = create_test_result(Some(0.3), Strength::Weak, Direction::Positive, 4);
        let rendered = render(1, &small);
        assert!(rendered.starts_with("#1 Sleep ↔ Mood"));
        assert!(rendered.contains("r = +0.30"));
        assert!(rendered.contains("Only 4 paired answers"));

        let large = create_test_result(Some(0.3), Strength::Weak, Direction::Positive, 40);
        assert!(!render(2, &large).contains("paired answers"));
    }
}
