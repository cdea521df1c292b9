//! End-to-end properties of the model builder and predictor.

use chrono::NaiveDate;
use dough_temp::data::seed_bakes;
use dough_temp::domain::{Bake, Conditions, ProductId};
use dough_temp::fit::{FitOutcome, build_model, build_model_report};
use dough_temp::models::{friction, predict, predict_water_temp};

const SOURDOUGH: ProductId = ProductId(1);

fn session(id: u64, product: ProductId, r: [f64; 7]) -> Bake {
    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    Bake {
        room_temp: Some(r[0]),
        flour_temp: Some(r[1]),
        water_temp: Some(r[2]),
        levain_temp: Some(r[3]),
        final_temp: Some(r[4]),
        mix_time: Some(r[5]),
        hydration: Some(r[6]),
        ..Bake::empty(id, product, date)
    }
}

/// Noise-free sessions from a known linear rule, with varied predictors.
fn exact_sessions() -> Vec<Bake> {
    // room, flour, levain, final, mix, hydration
    let inputs: [[f64; 6]; 10] = [
        [22.0, 20.0, 24.0, 25.0, 5.0, 70.0],
        [19.0, 18.5, 23.0, 24.0, 8.0, 65.0],
        [25.0, 21.0, 26.5, 26.0, 4.0, 75.0],
        [21.0, 17.0, 22.0, 25.5, 10.0, 72.0],
        [24.0, 23.5, 25.0, 24.5, 6.0, 80.0],
        [18.0, 16.0, 21.0, 26.5, 12.0, 68.0],
        [26.0, 24.0, 27.0, 25.0, 3.0, 78.0],
        [20.5, 19.0, 25.5, 24.0, 7.0, 74.0],
        [23.0, 18.0, 23.5, 27.0, 9.0, 66.0],
        [22.5, 22.0, 21.5, 25.0, 11.0, 71.0],
    ];
    inputs
        .iter()
        .zip(1u64..)
        .map(|(x, id)| {
            let water = 12.0 - 0.9 * x[0] - 1.1 * x[1] - 0.8 * x[2] + 2.5 * x[3] - 0.6 * x[4] + 0.05 * x[5];
            session(id, SOURDOUGH, [x[0], x[1], water, x[2], x[3], x[4], x[5]])
        })
        .collect()
}

#[test]
fn building_twice_is_bit_identical() {
    let bakes = exact_sessions();
    let a = build_model(&bakes, SOURDOUGH);
    let b = build_model(&bakes, SOURDOUGH);
    assert_eq!(a, b);
    for (x, y) in a.coefficients().iter().zip(b.coefficients().iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn fewer_than_three_sessions_stay_synthetic() {
    let bakes = seed_bakes();
    for n in 0..3 {
        let m = build_model(&bakes[..n], SOURDOUGH);
        assert!(m.is_synthetic);
        assert_eq!(m.r_squared, 0.0);
        assert_eq!(m.n_samples, n);
        assert_eq!(m.coefficients(), [-m.avg_friction, -1.0, -1.0, -1.0, 5.0, 0.0, 0.0]);
    }
}

#[test]
fn synthetic_prediction_matches_heuristic() {
    let m = build_model(&seed_bakes()[..1], SOURDOUGH);
    let c = Conditions {
        room_temp: Some(23.5),
        flour_temp: Some(19.0),
        levain_temp: Some(25.0),
        target_temp: Some(26.0),
        mix_time: Some(8.0),
        hydration: Some(72.0),
    };
    let expected = 5.0 * 26.0 - 23.5 - 19.0 - 25.0 - m.avg_friction;
    assert!((predict(&m, &c) - expected).abs() < 1e-9);
}

#[test]
fn noise_free_rule_is_recovered() {
    let m = build_model(&exact_sessions(), SOURDOUGH);
    assert!(!m.is_synthetic);
    assert!(m.r_squared > 0.999, "R² = {}", m.r_squared);
    assert!(m.r_squared <= 1.0);
}

#[test]
fn seed_sessions_fit_without_fallback() {
    let report = build_model_report(&seed_bakes(), SOURDOUGH);
    assert_eq!(report.outcome, FitOutcome::Fitted);
    let m = report.model;
    assert!(!m.is_synthetic);
    assert!(m.r_squared.is_finite());
    assert!((0.0..=1.0).contains(&m.r_squared));
}

#[test]
fn other_products_do_not_affect_the_model() {
    let mut bakes = exact_sessions();
    let before = build_model(&bakes, SOURDOUGH);
    bakes.push(session(99, ProductId(2), [30.0, 30.0, 5.0, 30.0, 22.0, 15.0, 60.0]));
    bakes.insert(0, session(100, ProductId(3), [10.0, 10.0, 50.0, 10.0, 27.0, 1.0, 90.0]));
    assert_eq!(build_model(&bakes, SOURDOUGH), before);
}

#[test]
fn rank_deficient_history_still_yields_a_model() {
    // Every predictor moves together; only the intercept direction is identified.
    let bakes: Vec<Bake> = (0..6)
        .map(|i| {
            let t = 20.0 + i as f64;
            session(i, SOURDOUGH, [t, t, 30.0 - i as f64, t, t, t, t])
        })
        .collect();
    let m = build_model(&bakes, SOURDOUGH);
    assert!(m.ready);
    assert!(m.coefficients().iter().all(|c| c.is_finite()));
    assert!((0.0..=1.0).contains(&m.r_squared));
}

#[test]
fn r_squared_stays_in_bounds_for_noisy_history() {
    let mut bakes = exact_sessions();
    for (i, b) in bakes.iter_mut().enumerate() {
        let jitter = if i % 2 == 0 { 3.0 } else { -3.0 };
        b.water_temp = b.water_temp.map(|w| w + jitter);
    }
    let m = build_model(&bakes, SOURDOUGH);
    assert!((0.0..=1.0).contains(&m.r_squared));
}

#[test]
fn friction_examples() {
    let b = session(1, SOURDOUGH, [22.0, 20.0, 30.0, 24.0, 25.0, 5.0, 70.0]);
    assert_eq!(friction(&b), Some(29.0));

    let mut partial = b.clone();
    partial.water_temp = None;
    assert_eq!(friction(&partial), None);
}

#[test]
fn prediction_without_model_is_unavailable() {
    assert!(predict_water_temp(None, &Conditions::default()).is_none());
}
