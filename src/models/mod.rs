//! Water-temperature model evaluation.
//!
//! Models are evaluated through small, pure functions so that the builder,
//! the predictor and the reports share one definition of the linear form.

pub mod model;

pub use model::*;
