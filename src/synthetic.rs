//! Seeded synthetic data: two Gaussian clusters, one per class.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::common_types::{FeatureMatrix, Label};
use crate::error::{KnnError, Result};

/// Class 1 is drawn from `N(+offset, I)` and class 2 from `N(-offset, I)` in `dims` dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBlobs {
    pub per_class: usize,
    pub dims: usize,
    /// Shift applied to every coordinate of the class means.
    pub offset: f64,
    pub seed: u64,
}

impl Default for TwoBlobs {
    fn default() -> Self {
        Self { per_class: 50, dims: 2, offset: 1.0, seed: 0 }
    }
}

/// An owned row-major dataset. All class 1 rows come first, then class 2.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Vec<f64>,
    n_features: usize,
    labels: Vec<Label>,
}

impl Dataset {
    pub fn features(&self) -> Result<FeatureMatrix<'_, f64>> {
        FeatureMatrix::new(&self.features, self.n_features)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl TwoBlobs {
    pub fn generate(&self) -> Result<Dataset> {
        if self.dims == 0 {
            return Err(KnnError::InvalidDimension(0));
        }
        if self.per_class == 0 {
            return Err(KnnError::EmptyDataset);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = 2 * self.per_class;
        let mut features = Vec::with_capacity(n * self.dims);
        let mut labels = Vec::with_capacity(n);
        for (label, centre) in [(Label::One, self.offset), (Label::Two, -self.offset)] {
            for _ in 0..self.per_class {
                features.extend((0..self.dims).map(|_| centre + rng.sample::<f64, _>(StandardNormal)));
                labels.push(label);
            }
        }
        Ok(Dataset { features, n_features: self.dims, labels })
    }
}
