//! Regression model builder.
//!
//! Given all logged sessions and a product, we:
//!
//! 1. keep the product's complete sessions
//! 2. build the heuristic ("synthetic") model from their average friction
//! 3. stop there if fewer than [`MIN_SAMPLES`] sessions are available
//! 4. standardize the predictors and solve the ridge problem
//! 5. map the coefficients back to raw units and score them with R²
//!
//! Any numerical failure resolves to the synthetic model, so callers never
//! need to handle an error from here.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::domain::{Bake, CompleteBake, ProductId, RegressionModel};
use crate::fit::standardize::ColumnScaling;
use crate::math::solve_ridge;
use crate::models::{N_COEFS, average_friction, design_row, evaluate, synthetic_model};

/// Complete sessions required before a regression is attempted.
pub const MIN_SAMPLES: usize = 3;

/// How the builder arrived at its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FitOutcome {
    /// Too few complete sessions; the synthetic model was returned.
    InsufficientData { have: usize, need: usize },
    /// The regularized system could not be solved; the synthetic model was returned.
    SolverFailed,
    /// A regression was fitted.
    Fitted,
}

/// The model plus the intermediate quantities of the fit.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub product_id: ProductId,
    pub model: RegressionModel,
    pub outcome: FitOutcome,
    /// Column scaling, present whenever a fit was attempted.
    pub scaling: Option<ColumnScaling>,
    /// Coefficients in standardized space, present only for a successful solve.
    pub standardized_beta: Option<Vec<f64>>,
    /// Sessions the model was built from (same order as the input).
    #[serde(skip)]
    pub sessions: Vec<CompleteBake>,
}

impl FitReport {
    /// Sessions still missing before a real regression is attempted.
    pub fn sessions_needed(&self) -> usize {
        MIN_SAMPLES.saturating_sub(self.model.n_samples)
    }
}

/// Build the water-temperature model for `product`.
pub fn build_model(bakes: &[Bake], product: ProductId) -> RegressionModel {
    build_model_report(bakes, product).model
}

/// Complete sessions logged for `product`, in input order.
pub fn complete_sessions(bakes: &[Bake], product: ProductId) -> Vec<CompleteBake> {
    bakes
        .iter()
        .filter(|b| b.product_id == product)
        .filter_map(Bake::complete)
        .collect()
}

/// Build the model for `product` and keep the fit's intermediate values.
pub fn build_model_report(bakes: &[Bake], product: ProductId) -> FitReport {
    let sessions = complete_sessions(bakes, product);
    let n = sessions.len();
    let fallback = synthetic_model(average_friction(&sessions), n);

    let mut report = FitReport {
        product_id: product,
        model: fallback,
        outcome: FitOutcome::InsufficientData {
            have: n,
            need: MIN_SAMPLES,
        },
        scaling: None,
        standardized_beta: None,
        sessions,
    };

    if n < MIN_SAMPLES {
        log::debug!("product {product}: {n} complete sessions, using heuristic model");
        return report;
    }

    let rows: Vec<[f64; N_COEFS]> = report.sessions.iter().map(design_row).collect();
    let raw = DMatrix::from_fn(n, N_COEFS, |i, j| rows[i][j]);
    let y = DVector::from_iterator(n, report.sessions.iter().map(|s| s.water_temp));

    let scaling = ColumnScaling::from_design(&raw);
    report.scaling = Some(scaling);

    let Some(beta) = solve_ridge(&scaling.standardize(&raw), &y) else {
        log::debug!("product {product}: ridge solve failed, using heuristic model");
        report.outcome = FitOutcome::SolverFailed;
        return report;
    };

    let coefs = scaling.destandardize(&beta);
    if coefs.iter().any(|c| !c.is_finite()) {
        log::debug!("product {product}: non-finite coefficients, using heuristic model");
        report.outcome = FitOutcome::SolverFailed;
        return report;
    }

    let r_squared = r_squared(&coefs, &rows, &y);
    report.standardized_beta = Some(beta.iter().copied().collect());
    report.outcome = FitOutcome::Fitted;
    report.model = RegressionModel {
        ready: true,
        is_synthetic: false,
        intercept: coefs[0],
        room_coef: coefs[1],
        flour_coef: coefs[2],
        levain_coef: coefs[3],
        target_coef: coefs[4],
        mix_time_coef: coefs[5],
        hydration_coef: coefs[6],
        r_squared,
        n_samples: n,
        avg_friction: fallback.avg_friction,
    };

    log::debug!("product {product}: fitted on n={n}, R²={r_squared:.4}");
    report
}

/// `1 − SSres/SStot`, clamped to `[0, 1]`; zero when `y` has no variance.
fn r_squared(coefs: &[f64; N_COEFS], rows: &[[f64; N_COEFS]], y: &DVector<f64>) -> f64 {
    let y_mean = y.mean();
    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (row, &yi) in rows.iter().zip(y.iter()) {
        let fitted = evaluate(coefs, row);
        ss_total += (yi - y_mean).powi(2);
        ss_residual += (yi - fitted).powi(2);
    }

    if ss_total == 0.0 {
        return 0.0;
    }
    let r2 = 1.0 - ss_residual / ss_total;
    if r2.is_finite() { r2.clamp(0.0, 1.0) } else { 0.0 }
}
