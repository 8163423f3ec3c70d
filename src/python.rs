//! Python bindings. Features arrive as lists of rows, labels as integers 1 or 2.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::common_types::{flatten_rows, labels_from_raw, FeatureMatrix, Label};
use crate::error::KnnError;
use crate::knn::{self, WeightedKnnClassifier};

impl From<KnnError> for PyErr {
    fn from(err: KnnError) -> Self {
        match err {
            KnnError::NotFitted => PyRuntimeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Row width must equal the classifier's `d`; zero-width rows fail here
/// rather than as an invalid dimension.
fn check_width(n_features: usize, d: usize) -> Result<(), KnnError> {
    if n_features != d {
        return Err(KnnError::shape(format!("{} features per row", d), format!("{} features per row", n_features)));
    }
    Ok(())
}

/// Owned training data kept by the Python class between calls.
struct TrainingSet {
    features: Vec<f64>,
    n_features: usize,
    labels: Vec<Label>,
}

#[pyfunction]
fn compute_optimal_weights(k: usize, d: usize) -> PyResult<Vec<f64>> {
    Ok(knn::compute_optimal_weights(k, d)?.into_inner())
}

#[pyfunction]
fn loocv_error(x: Vec<Vec<f64>>, y: Vec<i64>, k: usize, d: usize) -> PyResult<f64> {
    let (data, n_features) = flatten_rows(&x)?;
    let labels = labels_from_raw(&y)?;
    Ok(knn::loocv_error(&FeatureMatrix::new(&data, n_features)?, &labels, k, d)?)
}

/// Returns `(best_k, best_error)`.
#[pyfunction]
fn select_best_k(x: Vec<Vec<f64>>, y: Vec<i64>, candidates: Vec<usize>, d: usize) -> PyResult<(usize, f64)> {
    let (data, n_features) = flatten_rows(&x)?;
    let labels = labels_from_raw(&y)?;
    let best = knn::select_best_k(&FeatureMatrix::new(&data, n_features)?, &labels, &candidates, d)?;
    Ok((best.k, best.error))
}

#[pyclass(name = "WeightedKnnClassifier")]
struct PyWeightedKnnClassifier {
    k: usize,
    d: usize,
    weights: Vec<f64>,
    training: Option<TrainingSet>,
}

#[pymethods]
impl PyWeightedKnnClassifier {
    #[new]
    fn new(k: usize, d: usize) -> PyResult<Self> {
        let weights = knn::compute_optimal_weights(k, d)?.into_inner();
        Ok(PyWeightedKnnClassifier { k, d, weights, training: None })
    }

    fn fit(&mut self, x: Vec<Vec<f64>>, y: Vec<i64>) -> PyResult<()> {
        let (features, n_features) = flatten_rows(&x)?;
        check_width(n_features, self.d)?;
        let labels = labels_from_raw(&y)?;
        // Validate through the Rust classifier before replacing the stored data.
        WeightedKnnClassifier::new(self.k, self.d)?.fit(FeatureMatrix::new(&features, n_features)?, &labels)?;
        self.training = Some(TrainingSet { features, n_features, labels });
        Ok(())
    }

    fn predict(&self, x_test: Vec<Vec<f64>>) -> PyResult<Vec<i64>> {
        let mut classifier = WeightedKnnClassifier::new(self.k, self.d)?;
        let training = match &self.training {
            Some(training) => training,
            None => return Err(KnnError::NotFitted.into()),
        };
        if x_test.is_empty() {
            return Ok(Vec::new());
        }
        let (queries, n_features) = flatten_rows(&x_test)?;
        check_width(n_features, self.d)?;
        let model = classifier.fit(FeatureMatrix::new(&training.features, training.n_features)?, &training.labels)?;
        let predictions = model.predict(&FeatureMatrix::new(&queries, n_features)?)?;
        Ok(predictions.into_iter().map(Label::raw).collect())
    }

    #[getter]
    fn k(&self) -> usize {
        self.k
    }

    #[getter]
    fn d(&self) -> usize {
        self.d
    }

    #[getter]
    fn weights(&self) -> Vec<f64> {
        self.weights.clone()
    }

    #[getter]
    fn is_fitted(&self) -> bool {
        self.training.is_some()
    }
}

/// The Python module. Its name matches the `lib.name` in `Cargo.toml`.
#[pymodule]
fn optimal_knn(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_optimal_weights, m)?)?;
    m.add_function(wrap_pyfunction!(loocv_error, m)?)?;
    m.add_function(wrap_pyfunction!(select_best_k, m)?)?;
    m.add_class::<PyWeightedKnnClassifier>()?;
    Ok(())
}
