//! Ridge-regularized least squares.
//!
//! We solve the penalized normal equations
//!
//! ```text
//! (XᵀX + λI) β = Xᵀy
//! ```
//!
//! With at most a few dozen rows and seven columns the normal equations are
//! small and well within `f64` precision. The λ term keeps the system
//! invertible when columns are collinear or when there are fewer rows than
//! parameters (three sessions against seven coefficients is a normal case).

use nalgebra::{DMatrix, DVector};

use crate::math::gauss::solve_linear_system;

/// Ridge penalty added to the diagonal of `XᵀX`.
pub const RIDGE_LAMBDA: f64 = 0.01;

/// Solve the ridge problem for design matrix `x` (rows = observations) and target `y`.
///
/// The penalty is applied to every diagonal entry (the intercept included) and
/// never to `Xᵀy`. Returns `None` when the regularized system is still singular
/// or produces non-finite values.
pub fn solve_ridge(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.ncols() == 0 {
        log::debug!(
            "ridge solve rejected: X is {}x{}, y has {} entries",
            x.nrows(),
            x.ncols(),
            y.len()
        );
        return None;
    }

    let mut xtx = x.tr_mul(x);
    for i in 0..xtx.nrows() {
        xtx[(i, i)] += RIDGE_LAMBDA;
    }
    let xty = x.tr_mul(y);

    solve_linear_system(&xtx, &xty)
}
