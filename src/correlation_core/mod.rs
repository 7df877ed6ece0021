//! Correlation Core - Pairwise Correlation Engine
//!
//! Computes, for every pair of surveyed variables, the linear relationship between the
//! answers of respondents who answered both.
//!
//! # Architecture
//!
//! ```text
//! Variables + Observations (one column per variable, None = skipped)
//!     ↓
//! PairedSample (complete-case pairing per variable pair)
//!     ↓
//! pearson → CorrelationClassifier (strength band, direction) → scatter_points
//!     ↓
//! CorrelationEngine (one CorrelationResult per pair with overlap)
//!     ↓
//! ranker (|r| descending, absent last, truncate to top_k)
//! ```
//!
//! Every call is a pure computation over an in-memory snapshot; nothing is retained.

pub mod classifier;
pub mod engine;
pub mod pearson;
pub mod ranker;
pub mod report;
pub mod sampler;
pub mod scatter;
pub mod types;

pub use classifier::CorrelationClassifier;
pub use engine::CorrelationEngine;
pub use pearson::pearson;
pub use sampler::PairedSample;
pub use scatter::scatter_points;
pub use types::{
    CorrelationError, CorrelationResult, Direction, Observations, ScatterPoint, Strength,
    Variable, MAX_RATING, MIN_RATING,
};
