//! Weighted k-nearest-neighbor binary classifier with asymptotically optimal
//! neighbor weights and leave-one-out selection of `k`.
//!
//! Typical use: pick `k` with [`select_best_k`], build a
//! [`WeightedKnnClassifier`] with it, `fit` on the training data and `predict`.
//!
//! ```
//! use optimal_knn::{select_best_k, FeatureMatrix, Label, WeightedKnnClassifier};
//!
//! let data = vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 5.0, 5.0, 5.0, 6.0, 6.0, 5.0];
//! let labels = vec![Label::One, Label::One, Label::One, Label::Two, Label::Two, Label::Two];
//! let x = FeatureMatrix::new(&data, 2)?;
//!
//! let best = select_best_k(&x, &labels, &[1, 2, 3], 2)?;
//! let mut clf = WeightedKnnClassifier::new(best.k, 2)?;
//! clf.fit(x, &labels)?;
//!
//! let query = vec![0.5, 0.5];
//! assert_eq!(clf.predict(&FeatureMatrix::new(&query, 2)?)?, vec![Label::One]);
//! # Ok::<(), optimal_knn::KnnError>(())
//! ```

pub mod common_types;
pub mod error;
pub mod knn;
pub mod metrics;
pub mod synthetic;

#[cfg(feature = "python")]
mod python;

pub use common_types::{flatten_rows, labels_from_raw, FeatureMatrix, Label};
pub use error::{KnnError, Result};
pub use knn::{
    compute_optimal_weights, evaluate_candidates, loocv_error, rank_neighbors, select_best_k, CvResult,
    FittedModel, NeighborSet, WeightVector, WeightedKnnClassifier,
};
