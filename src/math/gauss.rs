//! Dense linear system solver.
//!
//! The regression only ever solves a 7×7 normal-equations system, so a plain
//! Gaussian elimination with partial pivoting is all we need:
//!
//! ```text
//! [A | b]  --forward elimination-->  [U | c]  --back substitution-->  x
//! ```
//!
//! The solver works on its own augmented copy, so callers' matrices are left
//! untouched.

use nalgebra::{DMatrix, DVector};

/// Pivots with a magnitude below this are treated as zero (singular system).
pub const PIVOT_EPS: f64 = 1e-12;

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` if the shapes are inconsistent, a pivot falls below
/// [`PIVOT_EPS`], or any solved component is non-finite.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let n = a.nrows();
    if n == 0 || a.ncols() != n || b.len() != n {
        log::debug!(
            "linear solve rejected: A is {}x{}, b has {} entries",
            a.nrows(),
            a.ncols(),
            b.len()
        );
        return None;
    }

    let mut ab = DMatrix::<f64>::zeros(n, n + 1);
    ab.view_mut((0, 0), (n, n)).copy_from(a);
    ab.set_column(n, b);

    for i in 0..n {
        let max_row = pivot_row(&ab, i);
        if max_row != i {
            ab.swap_rows(i, max_row);
        }

        let pivot = ab[(i, i)];
        if pivot.abs() < PIVOT_EPS {
            log::debug!("linear solve: pivot {pivot:e} in column {i} is below threshold");
            return None;
        }

        for k in (i + 1)..n {
            let factor = ab[(k, i)] / pivot;
            for j in i..=n {
                ab[(k, j)] -= factor * ab[(i, j)];
            }
        }
    }

    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut acc = ab[(i, n)];
        for j in (i + 1)..n {
            acc -= ab[(i, j)] * x[j];
        }
        let xi = acc / ab[(i, i)];
        if !xi.is_finite() {
            log::debug!("linear solve: component {i} is not finite");
            return None;
        }
        x[i] = xi;
    }

    Some(x)
}

/// Row at or below the diagonal with the largest magnitude in `col`.
///
/// Strict `>` keeps the earliest row on ties.
fn pivot_row(ab: &DMatrix<f64>, col: usize) -> usize {
    let mut best = col;
    for k in (col + 1)..ab.nrows() {
        if ab[(k, col)].abs() > ab[(best, col)].abs() {
            best = k;
        }
    }
    best
}
