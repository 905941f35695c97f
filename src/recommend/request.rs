use serde::{Deserialize, Serialize};

use crate::config::{RecommendConfig, DEFAULT_RESULT_COUNT};
use crate::corpus::Item;
use crate::error::{RecommendError, Result};
use crate::sentiment::{SentimentLabel, SentimentResult};

/// What the caller asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    /// title to find similar items for
    pub seed_title: Option<String>,
    /// case-insensitive substring of an item's category text
    pub category_filter: Option<String>,
    pub min_quality: f64,
    /// preferred sentiment, only used when no seed resolves
    pub mood_label: Option<SentimentLabel>,
    pub result_count: usize,
    /// permute collected candidates before the final stable sort
    pub shuffle_before_rank: bool,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            seed_title: None,
            category_filter: None,
            min_quality: 0.0,
            mood_label: None,
            result_count: DEFAULT_RESULT_COUNT,
            shuffle_before_rank: true,
        }
    }
}

impl RecommendationRequest {
    pub fn new(result_count: usize) -> Self {
        Self {
            result_count,
            ..Self::default()
        }
    }

    /// Request with the configured default result count
    pub fn from_config(config: &RecommendConfig) -> Self {
        Self::new(config.default_result_count)
    }

    pub fn seed_title(mut self, title: impl Into<String>) -> Self {
        self.seed_title = Some(title.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category_filter = Some(category.into());
        self
    }

    pub fn min_quality(mut self, min_quality: f64) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn mood(mut self, label: SentimentLabel) -> Self {
        self.mood_label = Some(label);
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_before_rank = shuffle;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.result_count == 0 {
            return Err(RecommendError::Validation("result_count must be positive".to_string()));
        }
        if !self.min_quality.is_finite() || self.min_quality < 0.0 {
            return Err(RecommendError::Validation(format!(
                "min_quality must be a finite number >= 0, got {}",
                self.min_quality
            )));
        }
        Ok(())
    }

    /// Seed title with surrounding whitespace removed, `None` when blank
    pub(crate) fn seed(&self) -> Option<&str> {
        self.seed_title.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Category filter, `None` when blank
    pub(crate) fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Quality and category filter shared by both ranking modes
    pub(crate) fn accepts(&self, item: &Item) -> bool {
        item.quality_score >= self.min_quality
            && self.category_filter().is_none_or(|c| item.matches_category(c))
    }
}

/// How the result was ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingMode {
    /// by similarity to a resolved seed item
    Similarity,
    /// by quality score
    General,
}

/// Which step resolved the seed title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedMatch {
    Exact,
    FilteredSubstring,
    CorpusSubstring,
}

/// One ranked item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<'a> {
    pub item: &'a Item,
    pub sentiment: SentimentResult,
    /// cosine similarity to the seed, only in similarity mode
    pub similarity: Option<f64>,
}

/// Ranked recommendations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult<'a> {
    pub mode: RankingMode,
    /// resolved seed item and how it was matched
    pub seed: Option<(&'a Item, SeedMatch)>,
    pub candidates: Vec<Candidate<'a>>,
}

impl<'a> RecommendationResult<'a> {
    pub(crate) fn empty() -> Self {
        Self {
            mode: RankingMode::General,
            seed: None,
            candidates: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Candidate<'a>> {
        self.candidates.iter()
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.candidates.iter().map(|c| c.item.title.as_str()).collect()
    }
}

impl<'a> IntoIterator for RecommendationResult<'a> {
    type Item = Candidate<'a>;
    type IntoIter = std::vec::IntoIter<Candidate<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}
