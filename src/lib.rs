pub mod config;
pub mod correlation_core;
pub mod service;
pub mod sqlite_pragma;
pub mod store;
pub mod survey;

pub use config::{Config, ConfigError};
pub use correlation_core::{CorrelationEngine, CorrelationResult, Observations, Variable};
pub use service::{ServiceError, SubmissionResult, SurveyService};
pub use store::{BackendType, ResponseStore, SurveyStore};
