//! Pairwise correlation engine
//!
//! Validates the whole input up front, then runs every unordered variable pair through
//! pairing, Pearson, classification and scatter aggregation before ranking.

use super::classifier::CorrelationClassifier;
use super::pearson::pearson;
use super::ranker;
use super::sampler::PairedSample;
use super::scatter::scatter_points;
use super::types::{
    CorrelationError, CorrelationResult, Observations, Variable, MAX_RATING, MIN_RATING,
};
use std::collections::HashSet;

pub struct CorrelationEngine {
    classifier: CorrelationClassifier,
}

impl CorrelationEngine {
    pub fn new(classifier: CorrelationClassifier) -> Self {
        Self { classifier }
    }

    pub fn with_defaults() -> Self {
        Self::new(CorrelationClassifier::with_defaults())
    }

    pub fn classifier(&self) -> &CorrelationClassifier {
        &self.classifier
    }

    /// Compute every pair and return the `top_k` strongest
    pub fn top_correlations(
        &self,
        variables: &[Variable],
        observations: &Observations,
        top_k: usize,
    ) -> Result<Vec<CorrelationResult>, CorrelationError> {
        if top_k == 0 {
            return Err(CorrelationError::InvalidTopK);
        }

        let results = self.compute_all(variables, observations)?;
        Ok(ranker::rank(results, top_k))
    }

    /// Compute every pair, strongest first, without truncation
    ///
    /// Pairs are enumerated in variable order (`i < j`). A pair with no respondent
    /// answering both variables is left out entirely; a pair with a single shared
    /// respondent is kept with an absent coefficient.
    pub fn compute_all(
        &self,
        variables: &[Variable],
        observations: &Observations,
    ) -> Result<Vec<CorrelationResult>, CorrelationError> {
        let columns = validate(variables, observations)?;

        let pair_count = variables.len() * variables.len().saturating_sub(1) / 2;
        let mut results = Vec::with_capacity(pair_count);
        let mut omitted = 0usize;

        for i in 0..variables.len() {
            for j in (i + 1)..variables.len() {
                let sample = PairedSample::from_columns(columns[i], columns[j]);

                match self.correlate_pair(&variables[i], &variables[j], &sample) {
                    Some(result) => results.push(result),
                    None => omitted += 1,
                }
            }
        }

        log::debug!(
            "📈 Computed {} correlations across {} variables ({} pairs without overlap)",
            results.len(),
            variables.len(),
            omitted
        );

        ranker::sort_by_magnitude(&mut results);
        Ok(results)
    }

    /// Build the result for one pair, or `None` when the pair shares no respondents
    pub fn correlate_pair(
        &self,
        first: &Variable,
        second: &Variable,
        sample: &PairedSample,
    ) -> Option<CorrelationResult> {
        if sample.is_empty() {
            return None;
        }

        let coefficient = pearson(sample);
        let (strength, direction) = self.classifier.classify(coefficient);

        Some(CorrelationResult {
            variable1_id: first.id.clone(),
            variable2_id: second.id.clone(),
            variable1_label: first.label.clone(),
            variable2_label: second.label.clone(),
            coefficient,
            strength,
            direction,
            sample_size: sample.len(),
            scatter_points: scatter_points(sample),
        })
    }
}

impl Default for CorrelationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Check the input contract and return the columns in variable order
fn validate<'a>(
    variables: &[Variable],
    observations: &'a Observations,
) -> Result<Vec<&'a [Option<u8>]>, CorrelationError> {
    if variables.is_empty() {
        return Err(CorrelationError::NoVariables);
    }

    let mut seen = HashSet::with_capacity(variables.len());
    for variable in variables {
        if !seen.insert(variable.id.as_str()) {
            return Err(CorrelationError::DuplicateVariable(variable.id.clone()));
        }
    }

    // Sorted so the reported id does not depend on hash order
    let mut unknown: Vec<&str> = observations.ids().filter(|id| !seen.contains(id)).collect();
    unknown.sort_unstable();
    if let Some(id) = unknown.first() {
        return Err(CorrelationError::UnknownVariable(id.to_string()));
    }

    let mut columns = Vec::with_capacity(variables.len());
    for variable in variables {
        let column = observations
            .column(&variable.id)
            .ok_or_else(|| CorrelationError::MissingColumn(variable.id.clone()))?;
        columns.push(column);
    }

    let expected = columns[0].len();
    for (variable, column) in variables.iter().zip(&columns) {
        if column.len() != expected {
            return Err(CorrelationError::LengthMismatch {
                variable: variable.id.clone(),
                expected,
                actual: column.len(),
            });
        }

        let out_of_range = column
            .iter()
            .enumerate()
            .find_map(|(index, value)| match value {
                Some(v) if !(MIN_RATING..=MAX_RATING).contains(v) => Some((index, *v)),
                _ => None,
            });

        if let Some((index, value)) = out_of_range {
            return Err(CorrelationError::RatingOutOfRange {
                variable: variable.id.clone(),
                index,
                value,
            });
        }
    }

    Ok(columns)
}
