//! Model evaluation for the water-temperature regression.
//!
//! The builder and the reporting code rely on a few primitive operations:
//! - build a design row for a complete session (for the fit)
//! - evaluate a model at a set of conditions (for predictions and R²)
//! - the friction diagnostic and the heuristic ("synthetic") model built from it

use crate::domain::{Bake, CompleteBake, Conditions, RegressionModel};

/// Number of columns in the design matrix: intercept + six predictors.
pub const N_COEFS: usize = 7;

/// Friction assumed when no complete session exists yet.
pub const DEFAULT_FRICTION: f64 = 30.0;

/// Heat picked up during mixing: `5·final − (room + flour + water + levain)`.
///
/// `None` if any of the five readings is missing.
pub fn friction(bake: &Bake) -> Option<f64> {
    let (room, flour, water, levain, fin) = (
        bake.room_temp?,
        bake.flour_temp?,
        bake.water_temp?,
        bake.levain_temp?,
        bake.final_temp?,
    );
    Some(friction_of(room, flour, water, levain, fin))
}

fn friction_of(room: f64, flour: f64, water: f64, levain: f64, fin: f64) -> f64 {
    5.0 * fin - (room + flour + water + levain)
}

/// Mean friction over complete sessions, or [`DEFAULT_FRICTION`] when there are none.
pub fn average_friction(sessions: &[CompleteBake]) -> f64 {
    if sessions.is_empty() {
        return DEFAULT_FRICTION;
    }
    let total: f64 = sessions
        .iter()
        .map(|s| {
            let f = friction_of(s.room_temp, s.flour_temp, s.water_temp, s.levain_temp, s.final_temp);
            if f.is_finite() { f } else { DEFAULT_FRICTION }
        })
        .sum();
    total / sessions.len() as f64
}

/// The classic baker's rule expressed as a degenerate regression:
///
/// `water = 5·target − room − flour − levain − friction`
pub fn synthetic_model(avg_friction: f64, n_samples: usize) -> RegressionModel {
    RegressionModel {
        ready: true,
        is_synthetic: true,
        intercept: -avg_friction,
        room_coef: -1.0,
        flour_coef: -1.0,
        levain_coef: -1.0,
        target_coef: 5.0,
        mix_time_coef: 0.0,
        hydration_coef: 0.0,
        r_squared: 0.0,
        n_samples,
        avg_friction,
    }
}

/// Fill a raw (unscaled) design row for a complete session.
///
/// Column order: `[1, room, flour, levain, final, mix, hydration]`.
pub fn design_row(session: &CompleteBake) -> [f64; N_COEFS] {
    [
        1.0,
        session.room_temp,
        session.flour_temp,
        session.levain_temp,
        session.final_temp,
        session.mix_time,
        session.hydration,
    ]
}

/// Evaluate coefficients (intercept first) against a raw design row.
pub fn evaluate(coefs: &[f64; N_COEFS], row: &[f64; N_COEFS]) -> f64 {
    coefs.iter().zip(row.iter()).map(|(c, x)| c * x).sum()
}

/// Predict the water temperature for the given conditions.
///
/// Missing or non-finite inputs count as 0.
pub fn predict(model: &RegressionModel, conditions: &Conditions) -> f64 {
    let value = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);

    model.intercept
        + model.room_coef * value(conditions.room_temp)
        + model.flour_coef * value(conditions.flour_temp)
        + model.levain_coef * value(conditions.levain_temp)
        + model.target_coef * value(conditions.target_temp)
        + model.mix_time_coef * value(conditions.mix_time)
        + model.hydration_coef * value(conditions.hydration)
}

/// Predict when a model may not be available; no model means no prediction.
pub fn predict_water_temp(model: Option<&RegressionModel>, conditions: &Conditions) -> Option<f64> {
    model.map(|m| predict(m, conditions))
}
