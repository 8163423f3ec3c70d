//! This module contains the data structures shared by the weight solver, the
//! neighbor ranker, the LOOCV evaluator and the classifier.

use crate::error::{KnnError, Result};
use num_traits::{AsPrimitive, Float};

/// One of the two class labels. The raw sentinel values are 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    One,
    Two,
}

impl Label {
    /// The integer sentinel used by callers (1 or 2).
    pub fn raw(self) -> i64 {
        match self {
            Label::One => 1,
            Label::Two => 2,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = KnnError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Label::One),
            2 => Ok(Label::Two),
            other => Err(KnnError::NonBinaryLabel(other)),
        }
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        label.raw()
    }
}

/// Converts raw integer labels, failing on the first value that is not 1 or 2.
pub fn labels_from_raw(raw: &[i64]) -> Result<Vec<Label>> {
    raw.iter().map(|&v| Label::try_from(v)).collect()
}

/// Flattens nested rows into a row-major buffer.
/// Returns the buffer and the number of features per row.
pub fn flatten_rows<F: Copy>(rows: &[Vec<F>]) -> Result<(Vec<F>, usize)> {
    let n_features = match rows.first() {
        Some(first) => first.len(),
        None => return Err(KnnError::EmptyDataset),
    };
    let mut data = Vec::with_capacity(rows.len() * n_features);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_features {
            return Err(KnnError::shape(
                format!("{} features in every row", n_features),
                format!("{} features in row {}", row.len(), i),
            ));
        }
        data.extend_from_slice(row);
    }
    Ok((data, n_features))
}

/// A borrowed, row-major `n x d` feature matrix.
///
/// The matrix never owns or mutates its buffer; the caller keeps the data
/// alive for as long as the view (or any model built from it) is in use.
#[derive(Debug, Clone, Copy)]
pub struct FeatureMatrix<'a, F> {
    data: &'a [F],
    n_rows: usize,
    n_features: usize,
}

impl<'a, F> FeatureMatrix<'a, F>
where
    F: Float + AsPrimitive<f64>,
{
    /// Wraps a row-major buffer holding rows of `n_features` values each.
    pub fn new(data: &'a [F], n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(KnnError::InvalidDimension(0));
        }
        if data.len() % n_features != 0 {
            return Err(KnnError::shape(
                format!("a multiple of {} values", n_features),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { data, n_rows: data.len() / n_features, n_features })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Row `i` as a slice. Panics if `i >= n_rows()`, like slice indexing.
    pub fn row(&self, i: usize) -> &'a [F] {
        let start = i * self.n_features;
        &self.data[start..start + self.n_features]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'a, F> {
        self.data.chunks_exact(self.n_features)
    }

    /// Checks that `labels` is aligned row-for-row with this matrix.
    pub(crate) fn check_labels(&self, labels: &[Label]) -> Result<()> {
        if labels.len() != self.n_rows {
            return Err(KnnError::shape(
                format!("{} labels (one per row)", self.n_rows),
                format!("{} labels", labels.len()),
            ));
        }
        Ok(())
    }

    /// Checks that rows have exactly `d` features.
    pub(crate) fn check_dimension(&self, d: usize) -> Result<()> {
        if self.n_features != d {
            return Err(KnnError::shape(
                format!("{} features per row", d),
                format!("{} features per row", self.n_features),
            ));
        }
        Ok(())
    }
}
