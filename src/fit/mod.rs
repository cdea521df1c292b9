//! Model fitting orchestration.
//!
//! Responsibilities:
//!
//! - standardize the predictors of a product's complete sessions
//! - solve the ridge problem and map coefficients back to raw units
//! - fall back to the heuristic model when data is short or the solve fails
//! - summarize every product at once

pub mod builder;
pub mod standardize;
pub mod summary;

pub use builder::*;
pub use standardize::*;
pub use summary::*;
