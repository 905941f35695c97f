use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TokenFrequency struct
/// Counts how often each token occurs in one document.
/// Tokens keep their first-seen order.
///
/// # Examples
/// ```
/// use tf_idf_recommender::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("hope");
/// token_freq.add_token("story");
/// token_freq.add_token("hope");
///
/// assert_eq!(token_freq.token_count("hope"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// Adding tokens
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add a token
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Add multiple tokens
    ///
    /// # Arguments
    /// * `tokens` - slice of tokens to add
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Reset all counts
    #[inline]
    pub fn clear(&mut self) {
        self.token_count.clear();
        self.total_token_count = 0;
    }
}

/// Statistics
impl TokenFrequency {
    /// Occurrences of `token`, 0 when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens added
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Distinct tokens in first-seen order
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }

    /// `(token, count)` in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Count of the most frequent token
    #[inline]
    pub fn most_frequent_token_count(&self) -> u32 {
        self.token_count.values().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_tokens() {
        let mut tf = TokenFrequency::new();
        tf.add_tokens(&["drama", "hope", "drama"]);
        assert_eq!(tf.token_count("drama"), 2);
        assert_eq!(tf.token_count("missing"), 0);
        assert_eq!(tf.token_sum(), 3);
        assert_eq!(tf.token_num(), 2);
        assert_eq!(tf.most_frequent_token_count(), 2);
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut tf = TokenFrequency::new();
        tf.add_tokens(&["b", "a", "b", "c"]);
        assert_eq!(tf.token_set_ref_str(), vec!["b", "a", "c"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut tf = TokenFrequency::new();
        tf.add_token("x");
        tf.clear();
        assert!(tf.is_empty());
        assert_eq!(tf.token_sum(), 0);
    }
}
