pub mod lexicon;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RecommendConfig;
use crate::error::RecommendError;

pub use lexicon::LexiconBackend;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        f.write_str(s)
    }
}

impl FromStr for SentimentLabel {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(RecommendError::Validation(format!("unknown sentiment label `{other}`"))),
        }
    }
}

/// Polarity in [-1, 1] and its label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    pub const NEUTRAL: SentimentResult = SentimentResult {
        polarity: 0.0,
        label: SentimentLabel::Neutral,
    };
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Text sentiment capability.
///
/// `analyze` returns `None` when the backend can not judge the text; the
/// scorer then reports a neutral result instead of failing.
pub trait SentimentBackend: Send + Sync + fmt::Debug {
    fn analyze(&self, text: &str) -> Option<f64>;
}

/// Backend used when no sentiment analysis is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl SentimentBackend for NoopBackend {
    fn analyze(&self, _text: &str) -> Option<f64> {
        None
    }
}

/// Maps text to a `SentimentResult` through a backend and fixed thresholds
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    backend: Arc<dyn SentimentBackend>,
    positive_threshold: f64,
    negative_threshold: f64,
}

impl SentimentScorer {
    pub fn new(backend: Arc<dyn SentimentBackend>, config: &RecommendConfig) -> Self {
        Self {
            backend,
            positive_threshold: config.positive_threshold,
            negative_threshold: config.negative_threshold,
        }
    }

    /// Scorer that labels everything Neutral
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopBackend), &RecommendConfig::default())
    }

    /// Scorer backed by the built-in lexicon
    pub fn lexicon() -> Self {
        Self::new(Arc::new(LexiconBackend::default()), &RecommendConfig::default())
    }

    pub fn backend(&self) -> &Arc<dyn SentimentBackend> {
        &self.backend
    }

    /// Score `text`, a missing or non-finite polarity is neutral
    pub fn score(&self, text: &str) -> SentimentResult {
        match self.backend.analyze(text) {
            Some(p) if p.is_finite() => {
                let polarity = p.clamp(-1.0, 1.0);
                SentimentResult {
                    polarity,
                    label: self.label_for(polarity),
                }
            }
            _ => SentimentResult::NEUTRAL,
        }
    }

    #[inline]
    pub fn label_for(&self, polarity: f64) -> SentimentLabel {
        if polarity > self.positive_threshold {
            SentimentLabel::Positive
        } else if polarity < self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::noop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(Option<f64>);

    impl SentimentBackend for Fixed {
        fn analyze(&self, _text: &str) -> Option<f64> {
            self.0
        }
    }

    fn scorer(p: Option<f64>) -> SentimentScorer {
        SentimentScorer::new(Arc::new(Fixed(p)), &RecommendConfig::default())
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(scorer(Some(0.25)).score("x").label, SentimentLabel::Neutral);
        assert_eq!(scorer(Some(0.26)).score("x").label, SentimentLabel::Positive);
        assert_eq!(scorer(Some(-0.25)).score("x").label, SentimentLabel::Neutral);
        assert_eq!(scorer(Some(-0.3)).score("x").label, SentimentLabel::Negative);
    }

    #[test]
    fn unavailable_backend_degrades_to_neutral() {
        assert_eq!(SentimentScorer::noop().score("wonderful"), SentimentResult::NEUTRAL);
        assert_eq!(scorer(Some(f64::NAN)).score("x"), SentimentResult::NEUTRAL);
    }

    #[test]
    fn polarity_is_clamped() {
        let r = scorer(Some(3.0)).score("x");
        assert_eq!(r.polarity, 1.0);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("positive".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
        assert_eq!(" NEGATIVE ".parse::<SentimentLabel>().unwrap(), SentimentLabel::Negative);
        assert!("happy".parse::<SentimentLabel>().is_err());
        assert_eq!(SentimentLabel::Neutral.to_string(), "Neutral");
    }
}
