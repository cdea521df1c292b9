//! Column standardization for the design matrix.
//!
//! Predictors live on very different scales (°C, minutes, percent), so the
//! ridge penalty is applied in standardized space:
//!
//! ```text
//! z_ij = (x_ij - mean_j) / std_j
//! ```
//!
//! The intercept column (index 0) is never touched. Coefficients solved in
//! standardized space are mapped back with [`ColumnScaling::destandardize`].

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::models::N_COEFS;

/// Number of scaled (non-intercept) columns.
pub const N_SCALED: usize = N_COEFS - 1;

/// Per-column mean and population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnScaling {
    pub means: [f64; N_SCALED],
    /// Population standard deviations; a constant column gets `1.0`.
    pub stds: [f64; N_SCALED],
}

impl ColumnScaling {
    /// Compute scaling from a raw design matrix with `N_COEFS` columns.
    ///
    /// # Panics
    /// Panics if `raw` has fewer than `N_COEFS` columns or no rows. The builder
    /// only calls this with at least three rows.
    pub fn from_design(raw: &DMatrix<f64>) -> Self {
        let n = raw.nrows() as f64;
        let mut means = [0.0; N_SCALED];
        let mut stds = [1.0; N_SCALED];

        for j in 0..N_SCALED {
            let col = raw.column(j + 1);
            let mean = col.sum() / n;
            let variance = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            means[j] = mean;
            stds[j] = if std == 0.0 { 1.0 } else { std };
        }

        Self { means, stds }
    }

    /// Standardized copy of `raw` (intercept column left as is).
    pub fn standardize(&self, raw: &DMatrix<f64>) -> DMatrix<f64> {
        let mut out = raw.clone();
        for j in 0..N_SCALED {
            let (mean, std) = (self.means[j], self.stds[j]);
            out.column_mut(j + 1).apply(|v| *v = (*v - mean) / std);
        }
        out
    }

    /// Map standardized-space coefficients back to raw input space.
    ///
    /// - `intercept = β0 − Σ βj·mean_j/std_j`
    /// - `coef_j = βj / std_j`
    pub fn destandardize(&self, beta: &DVector<f64>) -> [f64; N_COEFS] {
        let mut out = [0.0; N_COEFS];
        let mut shift = 0.0;
        for j in 0..N_SCALED {
            let b = beta[j + 1];
            shift += b * self.means[j] / self.stds[j];
            out[j + 1] = b / self.stds[j];
        }
        out[0] = beta[0] - shift;
        out
    }
}
