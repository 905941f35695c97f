use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::token::TokenFrequency;

/// Corpus-wide term statistics
/// It does not store document text; it only keeps:
/// - The number of documents
/// - The number of documents each term appears in
/// - The total number of occurrences of each term
///
/// It is the base data for IDF calculation and vocabulary selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermStats {
    doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    term_docs: IndexMap<Box<str>, TermCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    /// documents containing the term
    pub doc_freq: u64,
    /// occurrences across all documents
    pub total: u64,
}

impl TermStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's token frequency
    pub fn add_doc(&mut self, freq: &TokenFrequency) {
        self.doc_num += 1;
        for (token, count) in freq.iter() {
            let entry = self.term_docs.entry(token.into()).or_default();
            entry.doc_freq += 1;
            entry.total += count as u64;
        }
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.term_docs.get(term).map_or(0, |c| c.doc_freq)
    }

    #[inline]
    pub fn term_count(&self, term: &str) -> Option<TermCount> {
        self.term_docs.get(term).copied()
    }

    /// Number of distinct terms seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_docs.len()
    }

    /// Pick at most `max_terms` terms by corpus-wide occurrence, ties broken
    /// alphabetically. The result is sorted alphabetically, which is the
    /// dimension order of the vectors.
    pub fn top_terms(&self, max_terms: usize) -> Vec<Box<str>> {
        let mut terms: Vec<(&Box<str>, &TermCount)> = self.term_docs.iter().collect();
        terms.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(b.0)));
        terms.truncate(max_terms);
        let mut selected: Vec<Box<str>> = terms.into_iter().map(|(t, _)| t.clone()).collect();
        selected.sort();
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(tokens: &[&str]) -> TokenFrequency {
        let mut f = TokenFrequency::new();
        f.add_tokens(tokens);
        f
    }

    #[test]
    fn doc_freq_counts_documents_not_occurrences() {
        let mut stats = TermStats::new();
        stats.add_doc(&freq(&["war", "war", "peace"]));
        stats.add_doc(&freq(&["war"]));
        assert_eq!(stats.doc_num(), 2);
        assert_eq!(stats.doc_freq("war"), 2);
        assert_eq!(stats.doc_freq("peace"), 1);
        assert_eq!(stats.term_count("war").map(|c| c.total), Some(3));
        assert_eq!(stats.doc_freq("missing"), 0);
    }

    #[test]
    fn top_terms_prefers_frequent_then_alphabetical() {
        let mut stats = TermStats::new();
        stats.add_doc(&freq(&["zeta", "zeta", "zeta", "beta", "alpha", "gamma"]));
        let top = stats.top_terms(2);
        // zeta wins on count, alpha beats beta and gamma on the tie
        assert_eq!(top, vec![Box::from("alpha"), Box::from("zeta")]);
    }

    #[test]
    fn top_terms_without_cap_keeps_everything_sorted() {
        let mut stats = TermStats::new();
        stats.add_doc(&freq(&["b", "a", "c"]));
        assert_eq!(stats.top_terms(usize::MAX).len(), 3);
        assert_eq!(&*stats.top_terms(10)[0], "a");
    }
}
