//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - read from a history file
//! - used in-memory during fitting
//! - exported to JSON for other tools

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque product identifier (compared by equality only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product the baker logs sessions for (e.g. "Sourdough").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// One recorded baking session.
///
/// Every reading is optional: `None` means "not logged", which is distinct
/// from a logged zero. Temperatures are in °C, mix time in minutes and
/// hydration in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bake {
    pub id: u64,
    pub product_id: ProductId,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "de_reading")]
    pub room_temp: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub flour_temp: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub water_temp: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub levain_temp: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub final_temp: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub mix_time: Option<f64>,
    #[serde(default, deserialize_with = "de_reading")]
    pub hydration: Option<f64>,
}

/// A complete session with every reading present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteBake {
    pub room_temp: f64,
    pub flour_temp: f64,
    pub water_temp: f64,
    pub levain_temp: f64,
    pub final_temp: f64,
    pub mix_time: f64,
    pub hydration: f64,
}

impl Bake {
    /// A session with no readings logged yet.
    pub fn empty(id: u64, product_id: ProductId, date: NaiveDate) -> Self {
        Self {
            id,
            product_id,
            date,
            room_temp: None,
            flour_temp: None,
            water_temp: None,
            levain_temp: None,
            final_temp: None,
            mix_time: None,
            hydration: None,
        }
    }

    /// All seven readings, if every one of them is present.
    pub fn complete(&self) -> Option<CompleteBake> {
        Some(CompleteBake {
            room_temp: self.room_temp?,
            flour_temp: self.flour_temp?,
            water_temp: self.water_temp?,
            levain_temp: self.levain_temp?,
            final_temp: self.final_temp?,
            mix_time: self.mix_time?,
            hydration: self.hydration?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

/// Conditions for a new session that we want a water temperature for.
///
/// Missing readings are treated as zero by the predictor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub room_temp: Option<f64>,
    pub flour_temp: Option<f64>,
    pub levain_temp: Option<f64>,
    /// Desired final dough temperature.
    pub target_temp: Option<f64>,
    pub mix_time: Option<f64>,
    pub hydration: Option<f64>,
}

/// Linear water-temperature model for one product.
///
/// `water = intercept + room·room_coef + flour·flour_coef + levain·levain_coef
///          + target·target_coef + mix·mix_time_coef + hydration·hydration_coef`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub ready: bool,
    /// `true` while the model is the baker's heuristic rather than a fitted regression.
    pub is_synthetic: bool,
    pub intercept: f64,
    pub room_coef: f64,
    pub flour_coef: f64,
    pub levain_coef: f64,
    pub target_coef: f64,
    pub mix_time_coef: f64,
    pub hydration_coef: f64,
    /// Coefficient of determination, always in `[0, 1]` (0 for synthetic models).
    pub r_squared: f64,
    pub n_samples: usize,
    pub avg_friction: f64,
}

impl RegressionModel {
    /// Intercept followed by the six slopes in fixed order
    /// (room, flour, levain, target, mix time, hydration).
    pub fn coefficients(&self) -> [f64; 7] {
        [
            self.intercept,
            self.room_coef,
            self.flour_coef,
            self.levain_coef,
            self.target_coef,
            self.mix_time_coef,
            self.hydration_coef,
        ]
    }
}

/// Parameters for generating synthetic session histories.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub product_id: ProductId,
    pub count: usize,
    pub seed: u64,
    pub start_date: NaiveDate,
    /// Friction of a zero-minute mix (°C).
    pub base_friction: f64,
    /// Friction added per minute of mixing (°C/min).
    pub friction_per_minute: f64,
    /// Standard deviation of the friction noise (°C).
    pub noise_sd: f64,
    /// Probability that any single reading is left blank.
    pub blank_prob: f64,
}

/// Accept a number, `null`, an empty string or a numeric string.
///
/// Older history files store "not logged" as `""` inside numeric fields.
fn de_reading<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawReading {
        Number(f64),
        Text(String),
    }

    let value = match Option::<RawReading>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawReading::Number(v)) => v,
        Some(RawReading::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid reading '{s}'")))?
        }
    };
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!("reading must be finite, got {value}")));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn bake_is_complete_only_with_all_seven_readings() {
        let mut bake = Bake::empty(1, ProductId(1), date());
        assert!(!bake.is_complete());

        bake.room_temp = Some(22.0);
        bake.flour_temp = Some(20.0);
        bake.water_temp = Some(30.0);
        bake.levain_temp = Some(24.0);
        bake.final_temp = Some(25.0);
        bake.mix_time = Some(5.0);
        assert!(!bake.is_complete());

        // Zero is a reading, not a missing value.
        bake.hydration = Some(0.0);
        assert!(bake.is_complete());
    }

    #[test]
    fn legacy_empty_strings_deserialize_as_missing() {
        let json = r#"{
            "id": 7, "productId": 2, "date": "2026-01-16",
            "roomTemp": "", "flourTemp": "21.5", "waterTemp": 28,
            "levainTemp": null, "finalTemp": 24.5, "mixTime": 6
        }"#;
        let bake: Bake = serde_json::from_str(json).unwrap();
        assert_eq!(bake.product_id, ProductId(2));
        assert_eq!(bake.room_temp, None);
        assert_eq!(bake.flour_temp, Some(21.5));
        assert_eq!(bake.water_temp, Some(28.0));
        assert_eq!(bake.levain_temp, None);
        assert_eq!(bake.hydration, None);
    }

    #[test]
    fn garbage_reading_is_a_parse_error() {
        let json = r#"{"id": 1, "productId": 1, "date": "2026-01-16", "roomTemp": "warm"}"#;
        assert!(serde_json::from_str::<Bake>(json).is_err());
    }

    #[test]
    fn non_finite_reading_is_a_parse_error() {
        for text in ["NaN", "inf", "-infinity"] {
            let json = format!(r#"{{"id": 1, "productId": 1, "date": "2026-01-16", "roomTemp": "{text}"}}"#);
            assert!(serde_json::from_str::<Bake>(&json).is_err(), "{text}");
        }
        let ok = r#"{"id": 1, "productId": 1, "date": "2026-01-16", "roomTemp": " 21.5 "}"#;
        assert_eq!(serde_json::from_str::<Bake>(ok).unwrap().room_temp, Some(21.5));
    }

    #[test]
    fn missing_readings_serialize_as_null() {
        let bake = Bake::empty(3, ProductId(1), date());
        let value = serde_json::to_value(&bake).unwrap();
        assert!(value["roomTemp"].is_null());
        assert_eq!(value["productId"], 1);
    }
}
