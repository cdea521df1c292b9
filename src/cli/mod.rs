//! Command-line parsing for the water-temperature advisor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! engine and from command dispatch (`app`).

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dough", version, about = "Dough water-temperature advisor")]
pub struct Cli {
    /// Log engine decisions (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and print the model for one product.
    Model(ModelArgs),
    /// Recommend a water temperature for today's conditions.
    Predict(PredictArgs),
    /// List products with session counts and model status.
    Products(DataArgs),
    /// Show a product's sessions with their friction.
    History(HistoryArgs),
    /// Write a generated session history (for demos and experiments).
    Simulate(SimulateArgs),
}

/// Where the session history comes from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// History JSON file (default: $DOUGH_DATA, else dough-data.json).
    #[arg(long, value_name = "JSON")]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Product id or name (default: first product).
    #[arg(short, long)]
    pub product: Option<String>,

    /// Export the model to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Write a markdown debug bundle under ./debug.
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Product id or name (default: first product).
    #[arg(short, long)]
    pub product: Option<String>,

    /// Use a model exported with `dough model --export` instead of the history.
    #[arg(long, value_name = "JSON", conflicts_with = "product")]
    pub model: Option<PathBuf>,

    /// Room temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub room: Option<f64>,

    /// Flour temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub flour: Option<f64>,

    /// Levain temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub levain: Option<f64>,

    /// Target final dough temperature (°C).
    #[arg(long, default_value_t = 25.0)]
    pub target: f64,

    /// Mix time (minutes).
    #[arg(long)]
    pub mix: Option<f64>,

    /// Hydration (%).
    #[arg(long)]
    pub hydration: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Product id or name (default: first product).
    #[arg(short, long)]
    pub product: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Output history JSON file.
    #[arg(long, value_name = "JSON")]
    pub out: PathBuf,

    /// Product id or name from the default catalogue (default: first product).
    #[arg(short, long)]
    pub product: Option<String>,

    /// Number of sessions to generate.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Date of the first session.
    #[arg(long, default_value = "2026-01-01")]
    pub start: NaiveDate,

    /// Friction of a zero-minute mix (°C).
    #[arg(long, default_value_t = 20.0)]
    pub base_friction: f64,

    /// Friction added per minute of mixing (°C/min).
    #[arg(long, default_value_t = 1.5)]
    pub friction_per_minute: f64,

    /// Standard deviation of the friction noise (°C).
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Probability of leaving any single reading blank.
    #[arg(long, default_value_t = 0.0)]
    pub blank_prob: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predict_with_negative_room() {
        let cli = Cli::parse_from(["dough", "predict", "-p", "sourdough", "--room", "-2", "--target", "26"]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.product.as_deref(), Some("sourdough"));
        assert_eq!(args.room, Some(-2.0));
        assert_eq!(args.flour, None);
        assert_eq!(args.target, 26.0);
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::parse_from(["dough", "-v", "simulate", "--out", "x.json"]);
        assert!(cli.verbose);
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.count, 20);
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn model_file_conflicts_with_product() {
        let res = Cli::try_parse_from(["dough", "predict", "--model", "m.json", "-p", "1"]);
        assert!(res.is_err());
    }
}
