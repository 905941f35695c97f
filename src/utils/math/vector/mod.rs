pub mod math;

use std::fmt::Debug;

use num::Num;
use serde::{Deserialize, Serialize};

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It holds `inds` and `vals` side by side:
/// `inds` are the dimension indices of the stored elements,
/// `vals` are their values.
///
/// Elements are guaranteed to be sorted by ascending index and never zero.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    /// logical dimension
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Create an empty vector of dimension `len`
    pub fn new(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    pub fn with_capacity(len: usize, capacity: usize) -> Self {
        Self {
            inds: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
            len,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped, duplicated indices are summed,
    /// indices outside `len` are ignored.
    pub fn from_pairs(len: usize, pairs: impl IntoIterator<Item = (u32, N)>) -> Self {
        let mut pairs: Vec<(u32, N)> = pairs
            .into_iter()
            .filter(|(i, v)| (*i as usize) < len && !v.is_zero())
            .collect();
        pairs.sort_unstable_by_key(|(i, _)| *i);

        let mut vec = Self::with_capacity(len, pairs.len());
        for (ind, val) in pairs {
            match vec.inds.last() {
                Some(&last) if last == ind => {
                    if let Some(slot) = vec.vals.last_mut() {
                        *slot = *slot + val;
                    }
                }
                _ => {
                    vec.inds.push(ind);
                    vec.vals.push(val);
                }
            }
        }
        vec.inds.shrink_to_fit();
        vec.vals.shrink_to_fit();
        vec
    }

    /// Build from a dense slice
    pub fn from_dense(dense: &[N]) -> Self {
        Self::from_pairs(
            dense.len(),
            dense.iter().enumerate().map(|(i, v)| (i as u32, *v)),
        )
    }

    /// logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Get the value at `index`, zero when absent
    pub fn get(&self, index: u32) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate stored `(index, value)` pairs in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    #[inline]
    pub fn as_ind_slice(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn as_val_slice(&self) -> &[N] {
        &self.vals
    }

    /// Dense copy
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (i, v) in self.raw_iter() {
            dense[i as usize] = v;
        }
        dense
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "ZeroSpVec(len: {}, nnz: {}) [", self.len, self.nnz())?;
            for (i, v) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", i, v)?;
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.raw_iter()).finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_merges_and_drops_zeros() {
        let v = ZeroSpVec::from_pairs(10, vec![(5u32, 1.0f32), (2, 0.0), (1, 2.0), (5, 0.5), (42, 9.0)]);
        assert_eq!(v.len(), 10);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.as_ind_slice(), &[1, 5]);
        assert_eq!(v.as_val_slice(), &[2.0, 1.5]);
    }

    #[test]
    fn dense_round_trip_keeps_values() {
        let dense = vec![0.0f64, 3.0, 0.0, 0.25];
        let v = ZeroSpVec::from_dense(&dense);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(1), 3.0);
        assert_eq!(v.get(2), 0.0);
        assert_eq!(v.to_dense(), dense);
    }
}
