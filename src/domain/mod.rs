//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - products and their identifiers (`ProductId`, `Product`)
//! - logged sessions (`Bake`, `CompleteBake`)
//! - prediction inputs (`Conditions`) and the fitted output (`RegressionModel`)

pub mod types;

pub use types::*;
