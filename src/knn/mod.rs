//! Weighted k-nearest-neighbor classification with asymptotically optimal weights.
//!
//! - `weights`: the closed-form weight vector for `(k, d)`.
//! - `ranking`: Euclidean distances and deterministic neighbor ranking.
//! - `loocv`: leave-one-out error and selection of `k`.
//! - `classifier`: the fit/predict model.

pub mod classifier;
pub mod heap_utils;
pub mod loocv;
pub mod ranking;
pub mod vote;
pub mod weights;

pub use classifier::{FittedModel, WeightedKnnClassifier};
pub use loocv::{evaluate_candidates, loocv_error, select_best_k, CvResult};
pub use ranking::{euclidean_distance, rank_neighbors, Neighbor, NeighborSet};
pub use vote::weighted_vote;
pub use weights::{compute_optimal_weights, WeightVector};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::{FeatureMatrix, Label};
    use crate::metrics::accuracy;
    use crate::synthetic::TwoBlobs;

    /// Choose k by LOOCV, fit on the full data, then score the training set.
    #[test]
    fn test_select_then_fit_workflow() {
        let data = TwoBlobs { offset: 5.0, ..TwoBlobs::default() }.generate().unwrap();
        let x = data.features().unwrap();
        let candidates: Vec<usize> = (1..=20).collect();

        let best = select_best_k(&x, data.labels(), &candidates, 2).unwrap();
        assert_eq!(best, CvResult { k: 1, error: 0.0 });

        let mut clf = WeightedKnnClassifier::new(best.k, 2).unwrap();
        clf.fit(x, data.labels()).unwrap();
        let predicted = clf.predict(&x).unwrap();
        assert_eq!(accuracy(&predicted, data.labels()).unwrap(), 1.0);
    }

    #[test]
    fn test_loocv_agrees_with_classifier_on_held_out_rows() {
        let data = TwoBlobs { per_class: 20, dims: 4, offset: 0.4, seed: 5 }.generate().unwrap();
        let x = data.features().unwrap();
        let y = data.labels();
        let (n, d, k) = (data.n_rows(), 4, 5);

        let mut misses = 0;
        for j in 0..n {
            let mut rows = Vec::new();
            let mut labels: Vec<Label> = Vec::new();
            for i in (0..n).filter(|&i| i != j) {
                rows.extend_from_slice(x.row(i));
                labels.push(y[i]);
            }
            let mut clf = WeightedKnnClassifier::new(k, d).unwrap();
            clf.fit(FeatureMatrix::new(&rows, d).unwrap(), &labels).unwrap();
            if clf.predict_single(x.row(j)).unwrap() != y[j] {
                misses += 1;
            }
        }
        let expected = misses as f64 / n as f64;
        assert_eq!(loocv_error(&x, y, k, d).unwrap(), expected);
    }
}
