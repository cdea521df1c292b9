//! Per-product overview: session counts and a model for every product.

use rayon::prelude::*;

use crate::domain::{Bake, Product, RegressionModel};
use crate::fit::builder::{MIN_SAMPLES, build_model};

/// Model status for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub product: Product,
    /// Sessions with at least a room reading.
    pub sessions: usize,
    /// Sessions with all seven readings.
    pub complete: usize,
    /// Complete sessions still needed before the model is fitted.
    pub sessions_needed: usize,
    pub model: RegressionModel,
}

/// Build a summary for each product, in the order given.
///
/// Products are independent, so each model is built on its own rayon task.
pub fn summarize_products(products: &[Product], bakes: &[Bake]) -> Vec<ProductSummary> {
    products
        .par_iter()
        .map(|product| {
            let own = bakes.iter().filter(|b| b.product_id == product.id);
            let sessions = own.clone().filter(|b| b.room_temp.is_some()).count();
            let complete = own.filter(|b| b.is_complete()).count();
            let model = build_model(bakes, product.id);

            ProductSummary {
                product: product.clone(),
                sessions,
                complete,
                sessions_needed: MIN_SAMPLES.saturating_sub(complete),
                model,
            }
        })
        .collect()
}
