//! Asymptotically optimal neighbor weights for the weighted k-NN vote.
//!
//! For neighbor rank `i = 1..=k` in a `d`-dimensional feature space the raw weight is
//!
//! ```text
//! raw(i) = C / (i^(1 + 2/d) - (i - 1)^(1 + 2/d))
//! C      = (1/k) * (1 + d/2 - d / (2 * k^(2/d)))
//! ```
//!
//! and the returned weights are `raw(i) / sum_j raw(j)`, so they always sum to one.
//! The weights depend only on `(k, d)`, never on the data.

use crate::error::{KnnError, Result};
use tracing::warn;

/// Normalized voting weights, index `i` belongs to the `(i + 1)`-th nearest neighbor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// `false` means the solver degraded to infinities or NaNs for this `(k, d)`.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|w| w.is_finite())
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for WeightVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// `i^p - (i - 1)^p` for `i >= 1`.
///
/// Written as `i^p * (1 - (1 - 1/i)^p)` and evaluated with `ln_1p`/`exp_m1`
/// so the difference of two nearly equal powers does not cancel for large `i`.
fn power_increment(i: usize, p: f64) -> f64 {
    if i == 1 {
        return 1.0;
    }
    let i = i as f64;
    let tail = -(p * (-1.0 / i).ln_1p()).exp_m1();
    i.powf(p) * tail
}

/// Computes the normalized optimal weight vector of length `k`.
///
/// # Errors
/// `InvalidK` if `k == 0`, `InvalidDimension` if `d == 0`.
pub fn compute_optimal_weights(k: usize, d: usize) -> Result<WeightVector> {
    if k == 0 {
        return Err(KnnError::invalid_k(k, "k must be at least 1"));
    }
    if d == 0 {
        return Err(KnnError::InvalidDimension(d));
    }

    let k_f = k as f64;
    let d_f = d as f64;
    let exponent = 1.0 + 2.0 / d_f;
    // d/2 - d/(2 k^(2/d)) == (d/2) * (1 - k^(-2/d)), kept away from 0 - 0 for huge d.
    let constant = (1.0 + d_f / 2.0 * -(-2.0 * k_f.ln() / d_f).exp_m1()) / k_f;

    let mut weights: Vec<f64> = (1..=k).map(|i| constant / power_increment(i, exponent)).collect();
    let total: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= total);

    let weights = WeightVector(weights);
    if !weights.is_finite() {
        warn!(k, d, "optimal weights contain non-finite values");
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_single_neighbor_gets_all_weight() {
        let w = compute_optimal_weights(1, 2).unwrap();
        assert_eq!(w.len(), 1);
        assert_relative_eq!(w.as_slice()[0], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_matches_direct_formula_for_small_k() {
        // d = 2 gives exponent 2, so the denominators are 1, 3, 5.
        let w = compute_optimal_weights(3, 2).unwrap();
        let raw = [1.0, 1.0 / 3.0, 1.0 / 5.0];
        let total: f64 = raw.iter().sum();
        for (got, r) in w.iter().zip(raw.iter()) {
            assert_relative_eq!(*got, r / total, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_power_increment_is_stable_for_large_i() {
        let i = 1_000_000usize;
        let p = 1.0 + 2.0 / 3.0;
        // Leading term of the binomial expansion: p * i^(p - 1).
        let expected = p * (i as f64).powf(p - 1.0);
        assert_relative_eq!(power_increment(i, p), expected, max_relative = 1e-5);
    }

    #[test]
    fn test_weights_non_increasing_k5_d2() {
        let w = compute_optimal_weights(5, 2).unwrap();
        assert!(w.as_slice().windows(2).all(|pair| pair[0] >= pair[1]), "weights: {:?}", w);
    }

    #[test]
    fn test_weights_non_increasing_k10_d5() {
        let w = compute_optimal_weights(10, 5).unwrap();
        assert!(w.as_slice().windows(2).all(|pair| pair[0] >= pair[1]), "weights: {:?}", w);
        assert!(w.as_slice()[0] >= w.as_slice()[9]);
    }

    #[test]
    fn test_zero_k_is_invalid() {
        assert!(matches!(compute_optimal_weights(0, 2), Err(KnnError::InvalidK { k: 0, .. })));
    }

    #[test]
    fn test_zero_dimension_is_invalid() {
        assert_eq!(compute_optimal_weights(5, 0).unwrap_err(), KnnError::InvalidDimension(0));
    }

    #[test]
    fn test_large_k_stays_finite() {
        let w = compute_optimal_weights(100_000, 1).unwrap();
        assert!(w.is_finite());
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_huge_dimension_stays_finite() {
        for d in [1_000_000_000_000_000usize, 20_000_000_000_000_000, 100_000_000_000_000_000] {
            let w = compute_optimal_weights(2, d).unwrap();
            assert!(w.is_finite(), "d = {} gave {:?}", d, w);
            assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(w.as_slice()[0], 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_constant_matches_textbook_form() {
        // For moderate d the rewritten constant must not change the weights.
        for (k, d) in [(3usize, 1usize), (7, 4), (20, 9)] {
            let (k_f, d_f) = (k as f64, d as f64);
            let exponent = 1.0 + 2.0 / d_f;
            let constant = (1.0 / k_f) * (1.0 + d_f / 2.0 - d_f / (2.0 * k_f.powf(2.0 / d_f)));
            let raw: Vec<f64> = (1..=k)
                .map(|i| constant / ((i as f64).powf(exponent) - ((i - 1) as f64).powf(exponent)))
                .collect();
            let total: f64 = raw.iter().sum();
            let w = compute_optimal_weights(k, d).unwrap();
            for (got, r) in w.iter().zip(raw.iter()) {
                assert_relative_eq!(*got, r / total, max_relative = 1e-10);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_weights_sum_to_one(k in 1usize..300, d in 1usize..100) {
            let w = compute_optimal_weights(k, d).unwrap();
            prop_assert_eq!(w.len(), k);
            prop_assert!(w.iter().all(|&x| x >= 0.0));
            prop_assert!((w.iter().sum::<f64>() - 1.0).abs() < EPSILON);
        }

        #[test]
        fn prop_nearest_weighs_at_least_farthest(k in 1usize..300, d in 1usize..50) {
            let w = compute_optimal_weights(k, d).unwrap();
            prop_assert!(w.as_slice()[0] >= w.as_slice()[k - 1]);
        }
    }
}
