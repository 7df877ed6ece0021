//! Response storage
//!
//! Routes reads and writes to either the SQLite or JSONL backend based on configuration.
//! Only raw responses are stored; computed correlations never are.

pub mod jsonl_store;
pub mod sqlite_store;
pub mod store_backend;

pub use jsonl_store::JsonlResponseStore;
pub use sqlite_store::SqliteResponseStore;
pub use store_backend::{ResponseStore, StoreError, StoredResponse};

use crate::survey::SurveyData;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Jsonl,
    Sqlite,
}

impl BackendType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Some(BackendType::Sqlite),
            "jsonl" => Some(BackendType::Jsonl),
            _ => None,
        }
    }
}

/// Unified store that routes to either backend
pub enum SurveyStore {
    Jsonl(JsonlResponseStore),
    Sqlite(SqliteResponseStore),
}

impl SurveyStore {
    /// Open the store for a backend type at `path`
    pub fn open(backend: BackendType, path: impl AsRef<Path>) -> Result<Self, StoreError> {
        match backend {
            BackendType::Jsonl => Ok(SurveyStore::Jsonl(JsonlResponseStore::new(
                path.as_ref().to_path_buf(),
            )?)),
            BackendType::Sqlite => Ok(SurveyStore::Sqlite(SqliteResponseStore::new(path)?)),
        }
    }
}

#[async_trait]
impl ResponseStore for SurveyStore {
    async fn insert(&mut self, response: &StoredResponse) -> Result<(), StoreError> {
        match self {
            SurveyStore::Jsonl(s) => s.insert(response).await,
            SurveyStore::Sqlite(s) => s.insert(response).await,
        }
    }

    async fn load_all(&mut self) -> Result<Vec<SurveyData>, StoreError> {
        match self {
            SurveyStore::Jsonl(s) => s.load_all().await,
            SurveyStore::Sqlite(s) => s.load_all().await,
        }
    }

    async fn count(&mut self) -> Result<u64, StoreError> {
        match self {
            SurveyStore::Jsonl(s) => s.count().await,
            SurveyStore::Sqlite(s) => s.count().await,
        }
    }

    async fn has_fingerprint(&mut self, fingerprint_hash: &str) -> Result<bool, StoreError> {
        match self {
            SurveyStore::Jsonl(s) => s.has_fingerprint(fingerprint_hash).await,
            SurveyStore::Sqlite(s) => s.has_fingerprint(fingerprint_hash).await,
        }
    }

    fn backend_type(&self) -> &'static str {
        match self {
            SurveyStore::Jsonl(s) => s.backend_type(),
            SurveyStore::Sqlite(s) => s.backend_type(),
        }
    }
}
