//! Read/write model JSON files.
//!
//! A model file is the portable representation of a fitted (or heuristic)
//! model: the product it belongs to, the coefficients and fit quality, and the
//! equation as text for people reading the file directly. `dough predict
//! --model` reads it back without needing the session history.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::{Product, RegressionModel};
use crate::error::AppError;
use crate::report::format_equation;

/// Saved model file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    /// RFC 3339 timestamp of the export.
    pub generated: String,
    pub product: Product,
    pub model: RegressionModel,
    pub equation: String,
}

impl ModelFile {
    pub fn new(product: &Product, model: &RegressionModel) -> Self {
        Self {
            tool: "dough".to_string(),
            generated: Local::now().to_rfc3339(),
            product: product.clone(),
            model: *model,
            equation: format_equation(model),
        }
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, product: &Product, model: &RegressionModel) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create model JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &ModelFile::new(product, model))
        .map_err(|e| AppError::output(format!("Failed to write model JSON: {e}")))?;
    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let saved: ModelFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid model JSON: {e}")))?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{default_products, seed_bakes};
    use crate::fit::build_model;

    #[test]
    fn exported_model_reads_back() {
        let product = &default_products()[0];
        let model = build_model(&seed_bakes(), product.id);
        let path = std::env::temp_dir().join(format!("dough-temp-{}-model.json", std::process::id()));

        write_model_json(&path, product, &model).unwrap();
        let saved = read_model_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(saved.tool, "dough");
        assert_eq!(&saved.product, product);
        assert_eq!(saved.model.is_synthetic, model.is_synthetic);
        assert_eq!(saved.model.n_samples, 3);
        for (a, b) in saved.model.coefficients().iter().zip(model.coefficients().iter()) {
            assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn missing_model_file_is_an_input_error() {
        let err = read_model_json(Path::new("/nonexistent/dough/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
