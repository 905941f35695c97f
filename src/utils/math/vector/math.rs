use std::cmp::Ordering;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product computed in f64
    ///
    /// # Arguments
    /// * `other` - the other vector
    ///
    /// # Returns
    /// * `f64` - Σ(a_i * b_i)
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let (a_inds, a_vals) = (self.as_ind_slice(), self.as_val_slice());
        let (b_inds, b_vals) = (other.as_ind_slice(), other.as_val_slice());
        if a_inds.is_empty() || b_inds.is_empty() {
            return 0.0;
        }

        let mut result = 0.0;
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.as_val_slice()
            .iter()
            .map(|v| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum()
    }

    /// L2 norm
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either side is the zero vector
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (self.dot(other) / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

impl ZeroSpVec<f32> {
    /// Scale to unit L2 norm, zero vectors stay zero
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self::from_pairs(
            self.len(),
            self.raw_iter().map(|(i, v)| (i, (v as f64 / norm) as f32)),
        )
    }
}

impl ZeroSpVec<f64> {
    /// Scale to unit L2 norm, zero vectors stay zero
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self::from_pairs(self.len(), self.raw_iter().map(|(i, v)| (i, v / norm)))
    }
}
