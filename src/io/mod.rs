//! Input/output helpers.
//!
//! - session history read/write (`history`)
//! - model JSON read/write (`model`)

pub mod history;
pub mod model;

pub use history::*;
pub use model::*;
