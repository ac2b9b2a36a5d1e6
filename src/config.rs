//! Engine configuration.
//!
//! One flat struct covers every tunable of the pipeline. All fields have
//! defaults, so a JSON config file may set only what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};
use crate::intent::IntentGranularity;
use crate::matching::MatchMode;
use crate::recommend::DistanceMetric;

/// Configuration for a [`crate::engine::ChatEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Currency code expected in price mentions and catalog prices.
    pub currency: String,
    /// Neighbors returned by the fallback recommender.
    pub neighbors: usize,
    /// Random sample size for general inquiries.
    pub sample_size: usize,
    /// Maximum events listed for a broad listing request.
    pub listing_limit: usize,
    /// Description terms kept in the TF-IDF vocabulary.
    pub max_terms: usize,
    /// How extracted criteria combine during matching.
    pub match_mode: MatchMode,
    /// Whether criteria-bearing intents surface coarse or fine labels.
    pub granularity: IntentGranularity,
    /// Distance metric for nearest-neighbor search.
    pub metric: DistanceMetric,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: "BAM".to_string(),
            neighbors: 5,
            sample_size: 5,
            listing_limit: 10,
            max_terms: 50,
            match_mode: MatchMode::All,
            granularity: IntentGranularity::Coarse,
            metric: DistanceMetric::Euclidean,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(MarqueeError::invalid_config("currency must not be empty"));
        }
        if self.currency.chars().any(char::is_whitespace) {
            return Err(MarqueeError::invalid_config(
                "currency must be a single token",
            ));
        }
        if self.neighbors == 0 {
            return Err(MarqueeError::invalid_config("neighbors must be at least 1"));
        }
        if self.sample_size == 0 {
            return Err(MarqueeError::invalid_config(
                "sample_size must be at least 1",
            ));
        }
        if self.listing_limit == 0 {
            return Err(MarqueeError::invalid_config(
                "listing_limit must be at least 1",
            ));
        }
        if self.max_terms == 0 {
            return Err(MarqueeError::invalid_config("max_terms must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.currency, "BAM");
        assert_eq!(config.neighbors, 5);
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.listing_limit, 10);
        assert_eq!(config.max_terms, 50);
        assert_eq!(config.match_mode, MatchMode::All);
        assert_eq!(config.granularity, IntentGranularity::Coarse);
        assert_eq!(config.metric, DistanceMetric::Euclidean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"neighbors": 3, "match_mode": "any"}}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.neighbors, 3);
        assert_eq!(config.match_mode, MatchMode::Any);
        assert_eq!(config.currency, "BAM");
        assert_eq!(config.metric, DistanceMetric::Euclidean);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            match_mode: MatchMode::Any,
            granularity: IntentGranularity::Fine,
            metric: DistanceMetric::Cosine,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.match_mode, MatchMode::Any);
        assert_eq!(back.granularity, IntentGranularity::Fine);
        assert_eq!(back.metric, DistanceMetric::Cosine);
        assert_eq!(back.neighbors, config.neighbors);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero = EngineConfig {
            neighbors: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let blank = EngineConfig {
            currency: "  ".to_string(),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let spaced = EngineConfig {
            currency: "B AM".to_string(),
            ..Default::default()
        };
        assert!(spaced.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(EngineConfig::from_json_file("/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        assert!(EngineConfig::from_json_file(file.path()).is_err());
    }
}
