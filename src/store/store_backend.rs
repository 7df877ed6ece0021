//! Store backend trait for survey responses
//!
//! Defines the interface the service uses to persist and read back raw responses.

use crate::survey::SurveyData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Database(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// One stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub fingerprint_hash: String,
    /// Unix seconds
    pub created_at: i64,
    pub answers: SurveyData,
}

impl StoredResponse {
    pub fn new(fingerprint_hash: impl Into<String>, answers: SurveyData) -> Self {
        Self {
            fingerprint_hash: fingerprint_hash.into(),
            created_at: chrono::Utc::now().timestamp(),
            answers,
        }
    }
}

/// Backend trait for storing survey responses
#[async_trait]
pub trait ResponseStore: Send {
    /// Append one response
    async fn insert(&mut self, response: &StoredResponse) -> Result<(), StoreError>;

    /// All stored answers, oldest first
    async fn load_all(&mut self) -> Result<Vec<SurveyData>, StoreError>;

    /// Number of stored responses
    async fn count(&mut self) -> Result<u64, StoreError>;

    /// Whether any response was stored under this fingerprint
    async fn has_fingerprint(&mut self, fingerprint_hash: &str) -> Result<bool, StoreError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
