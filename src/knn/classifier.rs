//! The weighted k-NN classifier.
//!
//! A `WeightedKnnClassifier` starts unfitted with only `(k, d)` and the weights
//! derived from them. `fit` borrows a training set and produces a
//! [`FittedModel`]; predictions are answered by that model.

use num_traits::{AsPrimitive, Float};
use rayon::prelude::*;
use tracing::debug;

use super::loocv::validate_training;
use super::ranking::rank_neighbors;
use super::vote::classify;
use super::weights::{compute_optimal_weights, WeightVector};
use crate::common_types::{FeatureMatrix, Label};
use crate::error::{KnnError, Result};

/// A classifier bound to one training set. Never mutated after `fit`.
#[derive(Debug, Clone)]
pub struct FittedModel<'a, F> {
    k: usize,
    d: usize,
    weights: WeightVector,
    features: FeatureMatrix<'a, F>,
    labels: &'a [Label],
}

impl<'a, F> FittedModel<'a, F>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
{
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn n_train(&self) -> usize {
        self.features.n_rows()
    }

    /// Predicts one label per row of `x_test`, in row order.
    ///
    /// Every row is ranked against the full training set (no exclusion) and
    /// classified with the weighted vote. Rows are processed in parallel.
    ///
    /// # Errors
    /// `ShapeMismatch` if `x_test` rows do not have `d` features.
    pub fn predict(&self, x_test: &FeatureMatrix<'_, F>) -> Result<Vec<Label>> {
        x_test.check_dimension(self.d)?;
        (0..x_test.n_rows())
            .into_par_iter()
            .map(|j| self.predict_single(x_test.row(j)))
            .collect()
    }

    /// Predicts the label of a single query row.
    pub fn predict_single(&self, query: &[F]) -> Result<Label> {
        let neighbors = rank_neighbors(query, &self.features, self.labels, self.k, None)?;
        Ok(classify(self.weights.as_slice(), &neighbors))
    }
}

#[derive(Debug, Clone)]
enum ModelState<'a, F> {
    Unfitted,
    Fitted(FittedModel<'a, F>),
}

/// Weighted k-NN binary classifier using the asymptotically optimal weights for `(k, d)`.
#[derive(Debug, Clone)]
pub struct WeightedKnnClassifier<'a, F> {
    k: usize,
    d: usize,
    weights: WeightVector,
    state: ModelState<'a, F>,
}

impl<'a, F> WeightedKnnClassifier<'a, F>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
{
    /// Creates an unfitted classifier and derives its weights.
    ///
    /// # Errors
    /// `InvalidK` if `k == 0`, `InvalidDimension` if `d == 0`.
    pub fn new(k: usize, d: usize) -> Result<Self> {
        let weights = compute_optimal_weights(k, d)?;
        Ok(Self { k, d, weights, state: ModelState::Unfitted })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    /// The model from the latest successful `fit`, if any.
    pub fn fitted(&self) -> Option<&FittedModel<'a, F>> {
        match &self.state {
            ModelState::Unfitted => None,
            ModelState::Fitted(model) => Some(model),
        }
    }

    /// Binds the classifier to a training set, replacing any earlier one.
    ///
    /// The data is borrowed, not copied. The returned model is independent of
    /// the classifier, so a caller may keep it across later calls to `fit`.
    /// On error the previous state is left untouched.
    ///
    /// # Errors
    /// `EmptyDataset`, `ShapeMismatch` (label count or feature count), and
    /// `InvalidK` if `k` exceeds the number of training rows.
    pub fn fit(&mut self, x: FeatureMatrix<'a, F>, y: &'a [Label]) -> Result<FittedModel<'a, F>> {
        validate_training(&x, y, self.d)?;
        if self.k > x.n_rows() {
            return Err(KnnError::invalid_k(
                self.k,
                format!("prediction needs 1 <= k <= n = {}", x.n_rows()),
            ));
        }
        debug!(rows = x.n_rows(), features = x.n_features(), k = self.k, "fitting weighted k-NN");

        let model = FittedModel { k: self.k, d: self.d, weights: self.weights.clone(), features: x, labels: y };
        self.state = ModelState::Fitted(model.clone());
        Ok(model)
    }

    /// Predicts one label per row of `x_test` with the current fit.
    ///
    /// # Errors
    /// `NotFitted` before the first successful `fit`, otherwise as
    /// [`FittedModel::predict`].
    pub fn predict(&self, x_test: &FeatureMatrix<'_, F>) -> Result<Vec<Label>> {
        match &self.state {
            ModelState::Unfitted => Err(KnnError::NotFitted),
            ModelState::Fitted(model) => model.predict(x_test),
        }
    }

    pub fn predict_single(&self, query: &[F]) -> Result<Label> {
        match &self.state {
            ModelState::Unfitted => Err(KnnError::NotFitted),
            ModelState::Fitted(model) => model.predict_single(query),
        }
    }
}
