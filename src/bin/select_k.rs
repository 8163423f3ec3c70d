//! Choose k for the weighted k-NN classifier by leave-one-out cross-validation
//! on a synthetic two-cluster dataset, then fit and report training accuracy.
//!
//! Usage:
//!   cargo run --features cli --bin select_k -- --per-class 50 --dims 2 --k-max 20

use clap::Parser;
use optimal_knn::metrics::accuracy;
use optimal_knn::synthetic::TwoBlobs;
use optimal_knn::{select_best_k, KnnError, WeightedKnnClassifier};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "select_k")]
#[command(about = "Select k for the optimally weighted k-NN classifier by LOOCV")]
struct Args {
    /// Points generated per class
    #[arg(long, default_value = "50")]
    per_class: usize,

    /// Feature dimension
    #[arg(long, default_value = "2")]
    dims: usize,

    /// Class means sit at +offset and -offset in every coordinate
    #[arg(long, default_value = "1.0")]
    offset: f64,

    /// Random seed for the synthetic data
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Smallest candidate k
    #[arg(long, default_value = "1")]
    k_min: usize,

    /// Largest candidate k
    #[arg(long, default_value = "20")]
    k_max: usize,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

/// Candidate neighborhood sizes `k_min..=k_max`, with `k_min` raised to 1 and
/// `k_max` clipped to `n - 1`, the most neighbors leave-one-out allows.
/// An empty result means no candidate is usable.
fn candidate_ks(k_min: usize, k_max: usize, n: usize) -> Vec<usize> {
    let k_limit = n.saturating_sub(1);
    if k_max > k_limit {
        warn!(k_max, k_limit, "clipping candidates above n - 1");
    }
    (k_min.max(1)..=k_max.min(k_limit)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    let blobs = TwoBlobs { per_class: args.per_class, dims: args.dims, offset: args.offset, seed: args.seed };
    let data = blobs.generate()?;
    let x = data.features()?;
    info!(rows = data.n_rows(), features = data.n_features(), "generated synthetic dataset");

    let candidates = candidate_ks(args.k_min, args.k_max, data.n_rows());
    if candidates.is_empty() {
        return Err(KnnError::EmptyCandidateSet.into());
    }

    let best = select_best_k(&x, data.labels(), &candidates, args.dims)?;
    println!("Selected best k = {} with LOOCV error = {:.4}", best.k, best.error);

    let mut clf = WeightedKnnClassifier::new(best.k, args.dims)?;
    clf.fit(x, data.labels())?;
    let predicted = clf.predict(&x)?;
    println!("Training accuracy: {:.4}", accuracy(&predicted, data.labels())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_fits_inside_large_dataset() {
        assert_eq!(candidate_ks(1, 20, 100), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_k_max_clipped_to_n_minus_one() {
        assert_eq!(candidate_ks(1, 20, 10), (1..=9).collect::<Vec<_>>());
        assert_eq!(candidate_ks(5, 5, 6), vec![5]);
        assert!(candidate_ks(5, 5, 5).is_empty());
    }

    #[test]
    fn test_zero_k_min_starts_at_one() {
        assert_eq!(candidate_ks(0, 3, 100), vec![1, 2, 3]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(candidate_ks(7, 3, 100).is_empty());
    }

    #[test]
    fn test_tiny_datasets_have_no_candidates() {
        assert!(candidate_ks(1, 20, 1).is_empty());
        assert!(candidate_ks(1, 20, 0).is_empty());
    }
}
