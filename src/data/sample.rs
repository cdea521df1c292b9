//! Synthetic session generation.
//!
//! Sessions follow the baker's heuristic with a friction that grows with mix
//! time, plus Gaussian noise:
//!
//! ```text
//! friction = base + per_minute · mix + ε,   ε ~ N(0, noise_sd²)
//! water    = 5·final − room − flour − levain − friction
//! ```
//!
//! Generation is fully determined by the seed, so histories can be shared and
//! regenerated.

use chrono::Duration;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Bake, SimulateConfig};
use crate::error::AppError;

const HYDRATIONS: [f64; 7] = [65.0, 68.0, 70.0, 72.0, 75.0, 78.0, 80.0];

/// Generate `config.count` sessions for `config.product_id`, ids starting at `first_id`.
pub fn generate_sessions(config: &SimulateConfig, first_id: u64) -> Result<Vec<Bake>, AppError> {
    if config.count == 0 {
        return Err(AppError::input("Session count must be > 0."));
    }
    if !(config.blank_prob.is_finite() && (0.0..1.0).contains(&config.blank_prob)) {
        return Err(AppError::input("Blank probability must be in [0, 1)."));
    }
    if !(config.base_friction.is_finite() && config.friction_per_minute.is_finite()) {
        return Err(AppError::input("Invalid friction settings."));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(AppError::input("Noise must be a non-negative number."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::input(format!("Invalid noise setting: {e}")))?;
    let flour_offset = Normal::new(-1.5, 1.0)
        .map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;

    let mut out = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let room = round1(rng.gen_range(18.0..=27.0));
        let flour = round1(room + flour_offset.sample(&mut rng));
        let levain = round1(room + rng.gen_range(0.0..=3.0));
        let final_temp = f64::from(rng.gen_range(48..=54_u8)) / 2.0;
        let mix = f64::from(rng.gen_range(3..=12_u8));
        let hydration = *HYDRATIONS.choose(&mut rng).unwrap_or(&70.0);

        let friction = config.base_friction + config.friction_per_minute * mix + noise.sample(&mut rng);
        let water = round1(5.0 * final_temp - room - flour - levain - friction);

        let date = config
            .start_date
            .checked_add_signed(Duration::days(i as i64))
            .unwrap_or(config.start_date);

        let mut bake = Bake::empty(first_id + i as u64, config.product_id, date);
        let readings = [
            (&mut bake.room_temp, room),
            (&mut bake.flour_temp, flour),
            (&mut bake.water_temp, water),
            (&mut bake.levain_temp, levain),
            (&mut bake.final_temp, final_temp),
            (&mut bake.mix_time, mix),
            (&mut bake.hydration, hydration),
        ];
        for (slot, value) in readings {
            let blank = config.blank_prob > 0.0 && rng.gen_bool(config.blank_prob);
            *slot = if blank { None } else { Some(value) };
        }
        out.push(bake);
    }

    Ok(out)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductId;
    use crate::fit::build_model;
    use chrono::NaiveDate;

    fn config() -> SimulateConfig {
        SimulateConfig {
            product_id: ProductId(4),
            count: 30,
            seed: 7,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            base_friction: 20.0,
            friction_per_minute: 1.5,
            noise_sd: 0.3,
            blank_prob: 0.0,
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let a = generate_sessions(&config(), 1).unwrap();
        let b = generate_sessions(&config(), 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert!(a.iter().all(|s| s.is_complete() && s.product_id == ProductId(4)));
        assert_eq!(a[29].id, 30);
        assert_eq!(a[1].date, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
    }

    #[test]
    fn fitted_model_tracks_generated_friction() {
        let sessions = generate_sessions(&config(), 1).unwrap();
        let m = build_model(&sessions, ProductId(4));
        assert!(!m.is_synthetic);
        assert!(m.r_squared > 0.9, "R² = {}", m.r_squared);
        // Friction per minute shows up as a negative mix-time slope.
        assert!((m.mix_time_coef + 1.5).abs() < 0.3, "mix coef = {}", m.mix_time_coef);
    }

    #[test]
    fn blank_probability_leaves_gaps() {
        let cfg = SimulateConfig {
            blank_prob: 0.5,
            ..config()
        };
        let sessions = generate_sessions(&cfg, 1).unwrap();
        assert!(sessions.iter().any(|s| !s.is_complete()));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let zero = SimulateConfig { count: 0, ..config() };
        assert_eq!(generate_sessions(&zero, 1).unwrap_err().exit_code(), 2);

        let blank = SimulateConfig { blank_prob: 1.0, ..config() };
        assert!(generate_sessions(&blank, 1).is_err());

        let noise = SimulateConfig { noise_sd: -1.0, ..config() };
        assert_eq!(generate_sessions(&noise, 1).unwrap_err().exit_code(), 2);

        let nan_noise = SimulateConfig { noise_sd: f64::NAN, ..config() };
        assert!(generate_sessions(&nan_noise, 1).is_err());
    }

    #[test]
    fn zero_noise_is_allowed() {
        let cfg = SimulateConfig { noise_sd: 0.0, ..config() };
        assert_eq!(generate_sessions(&cfg, 1).unwrap().len(), cfg.count);
    }
}
