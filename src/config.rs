use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;
/// Similarity mode collects `candidate_multiplier * result_count` items before stopping
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 4;
pub const DEFAULT_RESULT_COUNT: usize = 5;
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.25;
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = -0.25;

/// Text indexer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// keep at most this many terms, picked by corpus-wide frequency
    pub max_features: usize,
    /// excluded in addition to the built-in English stop words
    pub extra_stop_words: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Orchestrator and sentiment label settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub candidate_multiplier: usize,
    pub default_result_count: usize,
    /// polarity strictly above this is Positive
    pub positive_threshold: f64,
    /// polarity strictly below this is Negative
    pub negative_threshold: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            candidate_multiplier: DEFAULT_CANDIDATE_MULTIPLIER,
            default_result_count: DEFAULT_RESULT_COUNT,
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
            negative_threshold: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

/// Engine configuration
///
/// ```toml
/// [index]
/// max_features = 5000
/// extra_stop_words = ["film", "movie"]
///
/// [recommend]
/// candidate_multiplier = 4
/// default_result_count = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index: IndexConfig,
    pub recommend: RecommendConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| RecommendError::Config(format!("invalid engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RecommendError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index.max_features == 0 {
            return Err(RecommendError::Config("index.max_features must be positive".to_string()));
        }
        let r = &self.recommend;
        if r.candidate_multiplier == 0 {
            return Err(RecommendError::Config(
                "recommend.candidate_multiplier must be positive".to_string(),
            ));
        }
        if r.default_result_count == 0 {
            return Err(RecommendError::Config(
                "recommend.default_result_count must be positive".to_string(),
            ));
        }
        let thresholds_nan = r.negative_threshold.is_nan() || r.positive_threshold.is_nan();
        if thresholds_nan || r.negative_threshold > r.positive_threshold {
            return Err(RecommendError::Config(format!(
                "recommend.negative_threshold ({}) must not exceed positive_threshold ({})",
                r.negative_threshold, r.positive_threshold
            )));
        }
        Ok(())
    }
}
