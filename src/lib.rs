//! `dough-temp` library crate.
//!
//! The binary (`dough`) is a thin wrapper around this library so that:
//!
//! - the regression engine is testable without spawning processes
//! - any front end (CLI today) consumes one copy of the engine
//!
//! Engine entry points: [`fit::build_model`] and [`models::predict_water_temp`].

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
