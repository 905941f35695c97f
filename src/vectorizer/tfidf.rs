use num::Num;

use crate::{
    utils::math::vector::ZeroSpVec,
    vectorizer::{stats::TermStats, token::TokenFrequency, Vocabulary},
};

/// TF-IDF calculation engine
///
/// Implementors decide how raw counts and document frequencies turn into
/// weights. `TextIndexer` calls `idf_vec` once per build and `tf_idf_vec`
/// once per document.
pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// Generate the IDF vector, one entry per vocabulary term
    /// # Arguments
    /// * `stats` - corpus term statistics
    /// * `vocab` - selected vocabulary in dimension order
    fn idf_vec(stats: &TermStats, vocab: &Vocabulary) -> Vec<N>;

    /// Generate the weighted vector of one document
    /// # Arguments
    /// * `freq` - token frequency of the document
    /// * `vocab` - selected vocabulary
    /// * `idf` - output of `idf_vec`
    fn tf_idf_vec(freq: &TokenFrequency, vocab: &Vocabulary, idf: &[N]) -> ZeroSpVec<N>;
}

/// Default TF-IDF engine
///
/// - tf: raw count of the term in the document
/// - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, never zero)
/// - each document vector is L2 normalized
///
/// Supports `f32` and `f64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    fn raw_tf_idf(freq: &TokenFrequency, vocab: &Vocabulary, idf: impl Fn(usize) -> f64) -> Vec<(u32, f64)> {
        freq.iter()
            .filter_map(|(token, count)| {
                vocab
                    .index_of(token)
                    .map(|idx| (idx as u32, count as f64 * idf(idx)))
            })
            .collect()
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(stats: &TermStats, vocab: &Vocabulary) -> Vec<f32> {
        vocab
            .terms()
            .map(|term| Self::smooth_idf(stats.doc_num(), stats.doc_freq(term)) as f32)
            .collect()
    }

    fn tf_idf_vec(freq: &TokenFrequency, vocab: &Vocabulary, idf: &[f32]) -> ZeroSpVec<f32> {
        let raw = Self::raw_tf_idf(freq, vocab, |i| idf[i] as f64);
        let norm = raw.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return ZeroSpVec::new(vocab.len());
        }
        ZeroSpVec::from_pairs(
            vocab.len(),
            raw.into_iter().map(|(i, v)| (i, (v / norm) as f32)),
        )
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(stats: &TermStats, vocab: &Vocabulary) -> Vec<f64> {
        vocab
            .terms()
            .map(|term| Self::smooth_idf(stats.doc_num(), stats.doc_freq(term)))
            .collect()
    }

    fn tf_idf_vec(freq: &TokenFrequency, vocab: &Vocabulary, idf: &[f64]) -> ZeroSpVec<f64> {
        let raw = Self::raw_tf_idf(freq, vocab, |i| idf[i]);
        ZeroSpVec::from_pairs(vocab.len(), raw).l2_normalized()
    }
}
