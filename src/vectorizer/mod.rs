pub mod analyzer;
pub mod evaluate;
pub mod stats;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IndexConfig;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    analyzer::Analyzer,
    stats::TermStats,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::TokenFrequency,
};

/// Fitted vocabulary
/// Term `i` of the vocabulary is dimension `i` of every vector.
/// Terms are kept in alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn from_terms(terms: impl IntoIterator<Item = Box<str>>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// Dimension of `term`
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at dimension `index`
    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| &**t)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Terms in dimension order
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| &**t)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// One TF-IDF vector per document plus the IDF weights that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermVectors<N = f32>
where
    N: Num + Copy,
{
    /// document vectors, same order as the input documents
    pub vectors: Vec<ZeroSpVec<N>>,
    /// IDF per vocabulary dimension
    pub idf: Vec<N>,
}

impl<N> TermVectors<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ZeroSpVec<N>> {
        self.vectors.get(index)
    }

    /// IDF of `term`, `None` when it is not in the vocabulary
    pub fn idf_of(&self, term: &str, vocab: &Vocabulary) -> Option<N> {
        vocab.index_of(term).and_then(|i| self.idf.get(i).copied())
    }
}

/// Text Indexer
/// Fits a bounded vocabulary over a document collection and converts every
/// document into an L2 normalized TF-IDF vector.
///
/// `TextIndexer<N, E>` has the following generic parameters:
/// - `N`: vector value type (`f32`, `f64`)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
#[derive(Debug, Clone)]
pub struct TextIndexer<N = f32, E = DefaultTFIDFEngine>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    analyzer: Analyzer,
    max_features: usize,
    _marker: PhantomData<(N, E)>,
}

impl<N, E> TextIndexer<N, E>
where
    N: Num + Copy + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            analyzer: Analyzer::with_extra_stop_words(&config.extra_stop_words),
            max_features: config.max_features,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Fit the vocabulary on `docs` and vectorize each of them.
    /// Output vectors keep the order of `docs`.
    pub fn build<S>(&self, docs: &[S]) -> (TermVectors<N>, Vocabulary)
    where
        S: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = docs
            .par_iter()
            .map(|doc| self.analyzer.analyze(doc.as_ref()))
            .collect();

        let mut stats = TermStats::new();
        for freq in &freqs {
            stats.add_doc(freq);
        }

        let vocab = Vocabulary::from_terms(stats.top_terms(self.max_features));
        let idf = E::idf_vec(&stats, &vocab);
        let vectors: Vec<ZeroSpVec<N>> = freqs
            .par_iter()
            .map(|freq| E::tf_idf_vec(freq, &vocab, &idf))
            .collect();

        debug!(
            documents = docs.len(),
            distinct_terms = stats.vocab_size(),
            vocabulary = vocab.len(),
            "built term vectors"
        );
        (TermVectors { vectors, idf }, vocab)
    }

    /// Vectorize unseen text against an already fitted vocabulary.
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str, vectors: &TermVectors<N>, vocab: &Vocabulary) -> ZeroSpVec<N> {
        let freq = self.analyzer.analyze(text);
        E::tf_idf_vec(&freq, vocab, &vectors.idf)
    }
}

impl Default for TextIndexer<f32, DefaultTFIDFEngine> {
    fn default() -> Self {
        Self::new(&IndexConfig::default())
    }
}
