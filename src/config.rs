//! Configuration for the ranking engine and the recommender.
//!
//! Every field has a default, so a configuration file only needs to name the
//! weights it changes:
//!
//! ```
//! use lectern::config::LecternConfig;
//!
//! let config = LecternConfig::from_json_str(r#"{"scoring": {"title_exact": 200.0}}"#).unwrap();
//! assert_eq!(config.scoring.title_exact, 200.0);
//! assert_eq!(config.scoring.title_prefix, 50.0);
//! assert_eq!(config.similarity.same_category, 30.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LecternError, Result};
use crate::ranking::ScoringConfig;
use crate::recommendation::SimilarityConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    /// Query scoring weights.
    pub scoring: ScoringConfig,
    /// Related-content similarity weights.
    pub similarity: SimilarityConfig,
}

impl LecternConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: LecternConfig = serde_json::from_str(text)
            .map_err(|e| LecternError::config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.similarity.validate()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = LecternConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LecternConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = LecternConfig::from_json_str(
            r#"{"similarity": {"pool_multiplier": 5, "same_series": 40.0}}"#,
        )
        .unwrap();
        assert_eq!(config.similarity.pool_multiplier, 5);
        assert_eq!(config.similarity.same_series, 40.0);
        assert_eq!(config.similarity.shared_tag, 20.0);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = LecternConfig::from_json_str(r#"{"scoring": {"tag_match": -1.0}}"#).unwrap_err();
        assert!(matches!(err, LecternError::Config(_)));

        let err = LecternConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, LecternError::Config(_)));
    }

    #[test]
    fn test_negative_recency_windows_rejected() {
        let err = LecternConfig::from_json_str(r#"{"scoring": {"recency_window_days": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, LecternError::Config(_)));

        let err = LecternConfig::from_json_str(r#"{"similarity": {"recency_window_days": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, LecternError::Config(_)));
    }

    #[test]
    fn test_huge_recency_windows_accepted() {
        let config = LecternConfig::from_json_str(&format!(
            r#"{{"scoring": {{"recency_window_days": {max}}}, "similarity": {{"recency_window_days": {max}}}}}"#,
            max = i64::MAX
        ))
        .unwrap();
        assert_eq!(config.scoring.recency_window_days, i64::MAX);
        assert_eq!(config.similarity.recency_window_days, i64::MAX);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lectern.json");
        let mut config = LecternConfig::default();
        config.scoring.recency_window_days = 7;
        fs::write(&path, config.to_json_pretty().unwrap()).unwrap();

        assert_eq!(LecternConfig::from_file(&path).unwrap(), config);
    }
}
