//! Strength and direction classification with configurable thresholds

use super::types::{Direction, Strength};

pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MODERATE_THRESHOLD: f64 = 0.4;
pub const DEFAULT_WEAK_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationClassifier {
    strong_threshold: f64,
    moderate_threshold: f64,
    weak_threshold: f64,
}

impl CorrelationClassifier {
    pub fn new(strong_threshold: f64, moderate_threshold: f64, weak_threshold: f64) -> Self {
        Self {
            strong_threshold,
            moderate_threshold,
            weak_threshold,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_STRONG_THRESHOLD,
            DEFAULT_MODERATE_THRESHOLD,
            DEFAULT_WEAK_THRESHOLD,
        )
    }

    /// Band `|r|` into a strength
    ///
    /// Bounds are inclusive: `|r| == 0.7` is strong with the default thresholds.
    pub fn strength(&self, coefficient: Option<f64>) -> Strength {
        let Some(r) = coefficient else {
            return Strength::None;
        };

        let magnitude = r.abs();
        if magnitude >= self.strong_threshold {
            Strength::Strong
        } else if magnitude >= self.moderate_threshold {
            Strength::Moderate
        } else if magnitude >= self.weak_threshold {
            Strength::Weak
        } else {
            Strength::None
        }
    }

    /// Sign of r; zero counts as positive
    pub fn direction(&self, coefficient: Option<f64>) -> Direction {
        match coefficient {
            None => Direction::None,
            Some(r) if r >= 0.0 => Direction::Positive,
            Some(_) => Direction::Negative,
        }
    }

    pub fn classify(&self, coefficient: Option<f64>) -> (Strength, Direction) {
        (self.strength(coefficient), self.direction(coefficient))
    }
}

impl Default for CorrelationClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
