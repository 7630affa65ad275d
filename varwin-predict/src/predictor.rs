//! Prediction interface consumed by the batch driver.

use anyhow::Result;
use ndarray::{Array2, Array3};

/// A trained classifier over fixed-length one-hot sequence batches.
///
/// `sequences` has shape `(windows, positions, 4)`; implementations must
/// return one score row per window, in input order. Within each batch the
/// driver stacks all reference windows first and all alternate windows
/// second, and splits the returned scores back apart on that boundary, so
/// preserving row order is part of the contract.
pub trait Predictor {
    fn predict(&mut self, sequences: &Array3<f32>) -> Result<Array2<f32>>;
}
