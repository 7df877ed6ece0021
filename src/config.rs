use crate::correlation_core::classifier::{
    DEFAULT_MODERATE_THRESHOLD, DEFAULT_STRONG_THRESHOLD, DEFAULT_WEAK_THRESHOLD,
};
use crate::correlation_core::CorrelationClassifier;
use crate::store::BackendType;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_DB_PATH: &str = "data/surveyflow.db";
pub const DEFAULT_JSONL_PATH: &str = "data/responses.jsonl";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub jsonl_path: PathBuf,
    pub top_k: usize,
    pub dedupe_submissions: bool,
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
    pub weak_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            jsonl_path: PathBuf::from(DEFAULT_JSONL_PATH),
            top_k: DEFAULT_TOP_K,
            dedupe_submissions: false,
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            moderate_threshold: DEFAULT_MODERATE_THRESHOLD,
            weak_threshold: DEFAULT_WEAK_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// - SURVEYFLOW_DB_PATH - SQLite database path (default: data/surveyflow.db)
    /// - SURVEYFLOW_JSONL_PATH - JSONL response file (default: data/responses.jsonl)
    /// - TOP_K - number of correlations returned (default: 5)
    /// - DEDUPE_SUBMISSIONS - refuse repeat submissions per fingerprint (default: false)
    /// - STRONG_THRESHOLD / MODERATE_THRESHOLD / WEAK_THRESHOLD - |r| bands
    ///   (default: 0.7 / 0.4 / 0.2)
    ///
    /// `RUST_LOG` is read by env_logger directly.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            db_path: lookup("SURVEYFLOW_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            jsonl_path: lookup("SURVEYFLOW_JSONL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.jsonl_path),
            top_k: parse_var(&lookup, "TOP_K", defaults.top_k)?,
            dedupe_submissions: parse_var(
                &lookup,
                "DEDUPE_SUBMISSIONS",
                defaults.dedupe_submissions,
            )?,
            strong_threshold: parse_var(&lookup, "STRONG_THRESHOLD", defaults.strong_threshold)?,
            moderate_threshold: parse_var(
                &lookup,
                "MODERATE_THRESHOLD",
                defaults.moderate_threshold,
            )?,
            weak_threshold: parse_var(&lookup, "WEAK_THRESHOLD", defaults.weak_threshold)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue(
                "TOP_K must be at least 1".to_string(),
            ));
        }

        let thresholds = [self.strong_threshold, self.moderate_threshold, self.weak_threshold];
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(ConfigError::InvalidValue(
                "correlation thresholds must lie within [0, 1]".to_string(),
            ));
        }

        if !(self.strong_threshold >= self.moderate_threshold
            && self.moderate_threshold >= self.weak_threshold)
        {
            return Err(ConfigError::InvalidValue(format!(
                "thresholds must satisfy strong >= moderate >= weak, got {} / {} / {}",
                self.strong_threshold, self.moderate_threshold, self.weak_threshold
            )));
        }

        Ok(())
    }

    pub fn classifier(&self) -> CorrelationClassifier {
        CorrelationClassifier::new(
            self.strong_threshold,
            self.moderate_threshold,
            self.weak_threshold,
        )
    }

    /// Storage location for a backend
    pub fn store_path(&self, backend: BackendType) -> &PathBuf {
        match backend {
            BackendType::Sqlite => &self.db_path,
            BackendType::Jsonl => &self.jsonl_path,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().to_lowercase().parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(format!("{} has unparseable value '{}'", name, raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top_k, 5);
        assert!(!config.dedupe_submissions);
        assert_eq!(config.classifier(), CorrelationClassifier::with_defaults());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SURVEYFLOW_DB_PATH", "/tmp/x.db"),
            ("TOP_K", "10"),
            ("DEDUPE_SUBMISSIONS", "TRUE"),
            ("WEAK_THRESHOLD", "0.1"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.store_path(BackendType::Sqlite), &PathBuf::from("/tmp/x.db"));
        assert_eq!(config.top_k, 10);
        assert!(config.dedupe_submissions);
        assert_eq!(config.weak_threshold, 0.1);
    }

    #[test]
    fn test_rejects_zero_top_k() {
        assert!(Config::from_lookup(lookup_from(&[("TOP_K", "0")])).is_err());
    }

    #[test]
    fn test_rejects_malformed_number() {
        let err = Config::from_lookup(lookup_from(&[("TOP_K", "five")])).unwrap_err();
        assert!(err.to_string().contains("TOP_K"));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let result = Config::from_lookup(lookup_from(&[
            ("STRONG_THRESHOLD", "0.3"),
            ("MODERATE_THRESHOLD", "0.5"),
        ]));
        assert!(result.is_err());

        assert!(Config::from_lookup(lookup_from(&[("WEAK_THRESHOLD", "-0.1")])).is_err());
    }
}
