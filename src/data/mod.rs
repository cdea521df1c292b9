//! Built-in and generated session data.

pub mod catalog;
pub mod sample;

pub use catalog::*;
pub use sample::*;
