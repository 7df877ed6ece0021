//! Survey intake: question catalog, submission record and device fingerprint

pub mod fingerprint;
pub mod questions;
pub mod submission;

pub use fingerprint::{DeviceFingerprint, ANONYMOUS_FINGERPRINT};
pub use questions::{catalog, variables, Question, QuestionKey};
pub use submission::{SubmissionPayload, SurveyData, SurveyError};
