use std::fmt::Debug;

use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::math::vector::ZeroSpVec;

/// One scored document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// position of the document in the corpus
    pub index: usize,
    pub score: f64,
}

/// Structure to store similarity results
#[derive(Clone, Default, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// The sort is stable, equal scores keep corpus order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|h| !h.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> {
        self.list.iter()
    }

    /// Score of the document at `index`, if it was scored
    pub fn score_of(&self, index: usize) -> Option<f64> {
        self.list.iter().find(|h| h.index == index).map(|h| h.score)
    }
}

impl IntoIterator for Hits {
    type Item = HitEntry;
    type IntoIter = std::vec::IntoIter<HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// Cosine similarity of `seed` against every vector in `all`, ranked
/// descending with ties in corpus order.
///
/// `exclude` drops one corpus position from the result, normally the seed's
/// own position when the seed is itself part of the corpus.
pub fn cosine_ranking<N>(seed: &ZeroSpVec<N>, all: &[ZeroSpVec<N>], exclude: Option<usize>) -> Hits
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    let list: Vec<HitEntry> = all
        .par_iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude)
        .map(|(index, vec)| HitEntry {
            index,
            score: seed.cosine_similarity(vec),
        })
        .collect();
    let mut hits = Hits::new(list);
    hits.sort_by_score_desc();
    hits
}
