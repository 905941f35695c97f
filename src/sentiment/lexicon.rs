//! Lexicon-based polarity
//!
//! Each known word carries a polarity in [-1, 1]. A preceding intensifier
//! scales the word, a negator within the previous three tokens flips it and
//! halves it. The text polarity is the mean over all scored words.

use std::collections::HashMap;

use super::SentimentBackend;

const WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brave", 0.6),
    ("brilliant", 0.9),
    ("charming", 0.5),
    ("cheerful", 0.6),
    ("delightful", 0.8),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("funny", 0.25),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("heartwarming", 0.7),
    ("hope", 0.5),
    ("hopeful", 0.6),
    ("inspiring", 0.7),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("kind", 0.6),
    ("love", 0.5),
    ("lovely", 0.5),
    ("magnificent", 1.0),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.7),
    ("remarkable", 0.75),
    ("success", 0.3),
    ("triumph", 0.6),
    ("uplifting", 0.7),
    ("warm", 0.6),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("afraid", -0.6),
    ("angry", -0.5),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bitter", -0.1),
    ("brutal", -0.9),
    ("cruel", -1.0),
    ("dark", -0.15),
    ("dead", -0.2),
    ("deadly", -0.5),
    ("death", -0.4),
    ("desperate", -0.6),
    ("despair", -0.6),
    ("evil", -1.0),
    ("fear", -0.5),
    ("grim", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("horror", -0.6),
    ("kill", -0.6),
    ("lonely", -0.5),
    ("lost", -0.3),
    ("murder", -0.7),
    ("painful", -0.7),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scary", -0.5),
    ("terrible", -1.0),
    ("tragic", -0.75),
    ("ugly", -0.7),
    ("violent", -0.8),
    ("war", -0.3),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("so", 1.2),
    ("truly", 1.2),
    ("deeply", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "isn't", "wasn't", "aren't", "won't", "can't", "cannot", "don't",
    "doesn't", "didn't", "without", "nor",
];

/// Polarity from a word lexicon
#[derive(Debug, Clone)]
pub struct LexiconBackend {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl LexiconBackend {
    /// Lexicon with additional or overriding word polarities
    pub fn with_words<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut backend = Self::default();
        for (word, polarity) in extra {
            backend
                .words
                .insert(word.into().to_lowercase(), polarity.clamp(-1.0, 1.0));
        }
        backend
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    fn is_negator(token: &str) -> bool {
        NEGATORS.contains(&token) || token.ends_with("n't")
    }
}

impl Default for LexiconBackend {
    fn default() -> Self {
        Self {
            words: WORDS.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect(),
        }
    }
}

impl SentimentBackend for LexiconBackend {
    fn analyze(&self, text: &str) -> Option<f64> {
        let tokens = Self::tokens(text);
        let mut sum = 0.0;
        let mut scored = 0usize;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token) else { continue };
            let mut polarity = base;
            if i >= 1 {
                if let Some(&factor) = self.intensifiers.get(&tokens[i - 1]) {
                    polarity *= factor;
                }
            }
            let negated = (1..=3).any(|k| i >= k && Self::is_negator(&tokens[i - k]));
            if negated {
                polarity *= -0.5;
            }
            sum += polarity.clamp(-1.0, 1.0);
            scored += 1;
        }
        if scored == 0 {
            return Some(0.0);
        }
        Some((sum / scored as f64).clamp(-1.0, 1.0))
    }
}
