//! Survey service: accept submissions and serve ranked correlations
//!
//! Glue between the response store and the correlation engine. Each call reloads the
//! full response set and recomputes from scratch.

use crate::correlation_core::{
    CorrelationEngine, CorrelationError, CorrelationResult, Observations, Variable,
};
use crate::store::{ResponseStore, StoreError, StoredResponse};
use crate::survey::{self, SurveyData, SurveyError};
use serde::Serialize;

#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Correlation(CorrelationError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<CorrelationError> for ServiceError {
    fn from(err: CorrelationError) -> Self {
        ServiceError::Correlation(err)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Store(e) => write!(f, "Store error: {}", e),
            ServiceError::Correlation(e) => write!(f, "Correlation error: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Outcome of a submission, as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_submitted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<Vec<CorrelationResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_responses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            already_submitted: None,
            correlations: None,
            total_responses: None,
            error: Some(message.into()),
        }
    }
}

pub struct SurveyService<S: ResponseStore> {
    store: S,
    variables: Vec<Variable>,
    engine: CorrelationEngine,
    top_k: usize,
    dedupe_submissions: bool,
}

impl<S: ResponseStore> SurveyService<S> {
    /// Service over the built-in question catalog
    pub fn new(store: S, engine: CorrelationEngine, top_k: usize) -> Self {
        Self {
            store,
            variables: survey::variables(),
            engine,
            top_k,
            dedupe_submissions: false,
        }
    }

    /// Refuse a second submission from an already-seen fingerprint
    pub fn with_dedupe(mut self, dedupe_submissions: bool) -> Self {
        self.dedupe_submissions = dedupe_submissions;
        self
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn backend_type(&self) -> &'static str {
        self.store.backend_type()
    }

    /// Store a submission and return the refreshed top correlations
    ///
    /// Failures are logged and reported through `error` rather than returned.
    pub async fn submit(&mut self, data: SurveyData, fingerprint_hash: &str) -> SubmissionResult {
        if let Err(SurveyError::AnswerOutOfRange { question, value }) = data.validate() {
            log::warn!(
                "Rejected submission from {}: {} answered {}",
                fingerprint_hash,
                question,
                value
            );
            return SubmissionResult::failure(format!(
                "Answer for {} must be between 1 and 7.",
                question.question().label
            ));
        }

        let already_submitted = match self.check_duplicate(fingerprint_hash).await {
            Ok(seen) => seen,
            Err(e) => {
                log::error!("Survey submission error: {}", e);
                return SubmissionResult::failure("Failed to submit survey. Please try again.");
            }
        };

        if !already_submitted {
            let response = StoredResponse::new(fingerprint_hash, data);
            if let Err(e) = self.store.insert(&response).await {
                log::error!("Survey submission error: {}", e);
                return SubmissionResult::failure("Failed to submit survey. Please try again.");
            }
            log::info!(
                "📨 Accepted submission from {} ({} answers)",
                fingerprint_hash,
                response.answers.answered_count()
            );
        } else {
            log::info!("🔁 Duplicate submission from {} ignored", fingerprint_hash);
        }

        let correlations = match self.correlations().await {
            Ok(correlations) => correlations,
            Err(e) => {
                log::error!("Error calculating correlations: {}", e);
                return SubmissionResult::failure(
                    "Failed to calculate correlations. Please try again.",
                );
            }
        };

        let total_responses = match self.total_responses().await {
            Ok(total) => total,
            Err(e) => {
                log::error!("Error getting total responses: {}", e);
                return SubmissionResult::failure("Failed to count responses. Please try again.");
            }
        };

        SubmissionResult {
            success: true,
            already_submitted: Some(already_submitted),
            correlations: Some(correlations),
            total_responses: Some(total_responses),
            error: None,
        }
    }

    /// Top correlations over every stored response
    pub async fn correlations(&mut self) -> Result<Vec<CorrelationResult>, ServiceError> {
        let responses = self.store.load_all().await?;

        if responses.is_empty() {
            return Ok(Vec::new());
        }

        let observations =
            Observations::from_rows(&self.variables, responses.iter().map(SurveyData::answers))?;

        let results = self
            .engine
            .top_correlations(&self.variables, &observations, self.top_k)?;

        log::debug!(
            "📊 {} correlations from {} responses",
            results.len(),
            responses.len()
        );

        Ok(results)
    }

    pub async fn total_responses(&mut self) -> Result<u64, ServiceError> {
        Ok(self.store.count().await?)
    }

    async fn check_duplicate(&mut self, fingerprint_hash: &str) -> Result<bool, StoreError> {
        if !self.dedupe_submissions {
            return Ok(false);
        }
        self.store.has_fingerprint(fingerprint_hash).await
    }
}
