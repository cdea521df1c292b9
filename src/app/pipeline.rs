//! Shared "load history -> pick product -> build model" workflow.
//!
//! Keeping this in one place avoids duplicating the core sequence across
//! commands; the commands then focus on presentation.

use std::path::Path;

use crate::data::find_product;
use crate::domain::Product;
use crate::error::AppError;
use crate::fit::{FitReport, build_model_report};
use crate::io::{History, HistorySource, load_history};

/// All computed outputs of a single model build.
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub history: History,
    pub source: HistorySource,
    pub product: Product,
    pub report: FitReport,
}

/// Load the history at `path` and build the model for `product_key`.
pub fn run_model(path: &Path, product_key: Option<&str>) -> Result<ModelRun, AppError> {
    let (history, source) = load_history(path)?;
    let product = resolve_product(&history.products, product_key)?.clone();
    let report = build_model_report(&history.bakes, product.id);

    Ok(ModelRun {
        history,
        source,
        product,
        report,
    })
}

/// Look a product up by id or name; `None` picks the first product.
pub fn resolve_product<'a>(products: &'a [Product], key: Option<&str>) -> Result<&'a Product, AppError> {
    match key {
        Some(key) => find_product(products, key).ok_or_else(|| {
            let known: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
            AppError::input(format!("Unknown product '{key}'. Known products: {}.", known.join(", ")))
        }),
        None => products
            .first()
            .ok_or_else(|| AppError::input("History has no products.")),
    }
}
