//! Numerical building blocks: a dense linear solver and the ridge least-squares solve.

pub mod gauss;
pub mod ridge;

pub use gauss::*;
pub use ridge::*;
