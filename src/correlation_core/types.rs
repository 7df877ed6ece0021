//! Value types shared by the correlation core

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest answer on the ordinal scale
pub const MIN_RATING: u8 = 1;
/// Highest answer on the ordinal scale
pub const MAX_RATING: u8 = 7;

/// A surveyed variable: stable id plus the label shown to people
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub label: String,
}

impl Variable {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Column store of answers keyed by variable id
///
/// Slot `i` of every column belongs to the same respondent. `None` marks a skipped answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations {
    columns: HashMap<String, Vec<Option<u8>>>,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the column for one variable
    pub fn insert_column(&mut self, id: impl Into<String>, values: Vec<Option<u8>>) {
        self.columns.insert(id.into(), values);
    }

    /// Builder-style variant of [`Observations::insert_column`]
    pub fn with_column(mut self, id: impl Into<String>, values: Vec<Option<u8>>) -> Self {
        self.insert_column(id, values);
        self
    }

    /// Build columns from respondent-indexed rows
    ///
    /// Each row must carry exactly one slot per variable, in variable order.
    pub fn from_rows<I>(variables: &[Variable], rows: I) -> Result<Self, CorrelationError>
    where
        I: IntoIterator<Item = Vec<Option<u8>>>,
    {
        let mut columns: Vec<Vec<Option<u8>>> = vec![Vec::new(); variables.len()];

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != variables.len() {
                return Err(CorrelationError::RowWidthMismatch {
                    row: row_index,
                    expected: variables.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        let columns = variables
            .iter()
            .map(|v| v.id.clone())
            .zip(columns)
            .collect();

        Ok(Self { columns })
    }

    pub fn column(&self, id: &str) -> Option<&[Option<u8>]> {
        self.columns.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

/// Coarse band of `|r|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
    None,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "strong",
            Strength::Moderate => "moderate",
            Strength::Weak => "weak",
            Strength::None => "none",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong Correlation",
            Strength::Moderate => "Moderate Correlation",
            Strength::Weak => "Weak Correlation",
            Strength::None => "No Correlation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
            Direction::None => "none",
        }
    }
}

/// Distinct `(x, y)` coordinate and how many respondents produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: u8,
    pub y: u8,
    pub count: usize,
}

/// Correlation between one pair of variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub variable1_id: String,
    pub variable2_id: String,
    pub variable1_label: String,
    pub variable2_label: String,
    /// `None` when fewer than two paired observations exist
    pub coefficient: Option<f64>,
    pub strength: Strength,
    pub direction: Direction,
    pub sample_size: usize,
    pub scatter_points: Vec<ScatterPoint>,
}

/// Contract violations detected by the correlation core
///
/// Insufficient data is never an error here; it shows up as an absent
/// coefficient or an omitted pair.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationError {
    NoVariables,
    DuplicateVariable(String),
    MissingColumn(String),
    UnknownVariable(String),
    LengthMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },
    RatingOutOfRange {
        variable: String,
        index: usize,
        value: u8,
    },
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    InvalidTopK,
}

impl std::fmt::Display for CorrelationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationError::NoVariables => write!(f, "Variable set is empty"),
            CorrelationError::DuplicateVariable(id) => write!(f, "Duplicate variable id: {}", id),
            CorrelationError::MissingColumn(id) => {
                write!(f, "No observations supplied for variable: {}", id)
            }
            CorrelationError::UnknownVariable(id) => {
                write!(f, "Observations reference unknown variable: {}", id)
            }
            CorrelationError::LengthMismatch {
                variable,
                expected,
                actual,
            } => write!(
                f,
                "Column {} has {} slots, expected {}",
                variable, actual, expected
            ),
            CorrelationError::RatingOutOfRange {
                variable,
                index,
                value,
            } => write!(
                f,
                "Rating {} at slot {} of {} is outside {}..={}",
                value, index, variable, MIN_RATING, MAX_RATING
            ),
            CorrelationError::RowWidthMismatch {
                row,
                expected,
                actual,
            } => write!(
                f,
                "Row {} has {} answers, expected {}",
                row, actual, expected
            ),
            CorrelationError::InvalidTopK => write!(f, "top_k must be at least 1"),
        }
    }
}

impl std::error::Error for CorrelationError {}
