//! Reporting utilities: per-session residuals and formatted terminal output.

use crate::fit::FitReport;
use crate::models::{design_row, evaluate};

pub mod format;

pub use format::*;

/// Observed vs fitted water temperature for one training session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResidual {
    pub observed: f64,
    pub fitted: f64,
    pub residual: f64,
}

/// Fitted values and residuals for each session the model was built from.
pub fn compute_residuals(report: &FitReport) -> Vec<SessionResidual> {
    let coefs = report.model.coefficients();
    report
        .sessions
        .iter()
        .map(|s| {
            let fitted = evaluate(&coefs, &design_row(s));
            SessionResidual {
                observed: s.water_temp,
                fitted,
                residual: s.water_temp - fitted,
            }
        })
        .collect()
}

/// Root-mean-square residual, `None` without sessions.
pub fn rmse(residuals: &[SessionResidual]) -> Option<f64> {
    if residuals.is_empty() {
        return None;
    }
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    Some((sse / residuals.len() as f64).sqrt())
}
