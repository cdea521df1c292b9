//! Session history file (JSON).
//!
//! Layout:
//!
//! ```json
//! { "products": [{ "id": 1, "name": "Sourdough" }],
//!   "bakes": [{ "id": 1, "productId": 1, "date": "2026-01-15", "roomTemp": 22, ... }] }
//! ```
//!
//! Readings may be numbers, `null`, missing, or the legacy empty string; see
//! `domain::Bake`. A missing file is not an error: the built-in catalogue and
//! seed sessions are used instead.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{default_products, seed_bakes};
use crate::domain::{Bake, Product};
use crate::error::AppError;

/// Everything the engine reads: products and their logged sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub bakes: Vec<Bake>,
}

/// Where a loaded history came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    File,
    BuiltIn,
}

impl History {
    /// Built-in catalogue plus the seed sessions.
    pub fn seeded() -> Self {
        Self {
            products: default_products(),
            bakes: seed_bakes(),
        }
    }

    /// Next free session id.
    pub fn next_bake_id(&self) -> u64 {
        self.bakes.iter().map(|b| b.id).max().map_or(1, |m| m + 1)
    }
}

/// Load a history file, falling back to the built-in data if it does not exist.
pub fn load_history(path: &Path) -> Result<(History, HistorySource), AppError> {
    if !path.exists() {
        log::info!("no history at '{}', using built-in sessions", path.display());
        return Ok((History::seeded(), HistorySource::BuiltIn));
    }

    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open history '{}': {e}", path.display())))?;
    let mut history: History = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid history '{}': {e}", path.display())))?;

    if history.products.is_empty() {
        log::warn!("history '{}' lists no products, using the default catalogue", path.display());
        history.products = default_products();
    }
    validate(&history);

    log::debug!(
        "loaded {} products and {} sessions from '{}'",
        history.products.len(),
        history.bakes.len(),
        path.display()
    );
    Ok((history, HistorySource::File))
}

/// Write a history file (pretty-printed).
pub fn write_history(path: &Path, history: &History) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create history '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, history)
        .map_err(|e| AppError::output(format!("Failed to write history: {e}")))?;
    Ok(())
}

/// Report suspicious rows without rejecting the file; the engine copes with all of them.
fn validate(history: &History) {
    let product_ids: HashSet<_> = history.products.iter().map(|p| p.id).collect();
    let mut seen = HashSet::new();
    for bake in &history.bakes {
        if !seen.insert(bake.id) {
            log::warn!("session id {} appears more than once", bake.id);
        }
        if !product_ids.contains(&bake.product_id) {
            log::warn!("session {} refers to unknown product {}", bake.id, bake.product_id);
        }
    }
}
