//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the history file and product
//! - runs the model builder / predictor
//! - prints reports and writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Cli, Command, DataArgs, HistoryArgs, ModelArgs, PredictArgs, SimulateArgs};
use crate::data::{default_products, generate_sessions};
use crate::domain::{Conditions, ProductId, SimulateConfig};
use crate::error::AppError;
use crate::fit::summarize_products;
use crate::io::{History, HistorySource, load_history, read_model_json, write_history, write_model_json};
use crate::models::predict_water_temp;

pub mod pipeline;

/// Environment variable naming the default history file.
pub const DATA_ENV: &str = "DOUGH_DATA";

/// History file used when neither `--data` nor `DOUGH_DATA` is given.
pub const DEFAULT_DATA_FILE: &str = "dough-data.json";

/// Entry point for the `dough` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Model(args) => handle_model(args),
        Command::Predict(args) => handle_predict(args),
        Command::Products(args) => handle_products(args),
        Command::History(args) => handle_history(args),
        Command::Simulate(args) => handle_simulate(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    // A logger may already be installed.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn handle_model(args: ModelArgs) -> Result<(), AppError> {
    let path = data_path(&args.data);
    let run = pipeline::run_model(&path, args.product.as_deref())?;
    note_source(run.source, &path);

    println!("{}", crate::report::format_model_summary(&run.product, &run.report));

    if let Some(out) = &args.export {
        write_model_json(out, &run.product, &run.report.model)?;
        println!("Model written to {}", out.display());
    }
    if args.debug {
        let bundle = crate::debug::write_debug_bundle(Path::new("debug"), &run.product, &run.report)?;
        println!("Debug bundle written to {}", bundle.display());
    }
    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let conditions = Conditions {
        room_temp: args.room,
        flour_temp: args.flour,
        levain_temp: args.levain,
        target_temp: Some(args.target),
        mix_time: args.mix,
        hydration: args.hydration,
    };
    let missing = [
        ("--room", args.room),
        ("--flour", args.flour),
        ("--levain", args.levain),
        ("--mix", args.mix),
        ("--hydration", args.hydration),
    ];
    for (flag, value) in missing {
        if value.is_none() {
            log::warn!("{flag} not given, counting it as 0");
        }
    }

    let (name, model) = match &args.model {
        Some(file) => {
            let saved = read_model_json(file)?;
            (saved.product.name, saved.model)
        }
        None => {
            let path = data_path(&args.data);
            let run = pipeline::run_model(&path, args.product.as_deref())?;
            note_source(run.source, &path);
            (run.product.name, run.report.model)
        }
    };

    let prediction = predict_water_temp(Some(&model), &conditions);
    print!("{}", crate::report::format_prediction(&name, &conditions, prediction));
    if model.is_synthetic {
        let needed = crate::fit::MIN_SAMPLES.saturating_sub(model.n_samples);
        println!("(heuristic model: log {needed} more complete sessions to train it)");
    }
    Ok(())
}

fn handle_products(args: DataArgs) -> Result<(), AppError> {
    let path = data_path(&args);
    let (history, source) = load_history(&path)?;
    note_source(source, &path);

    let summaries = summarize_products(&history.products, &history.bakes);
    print!("{}", crate::report::format_products(&summaries));
    Ok(())
}

fn handle_history(args: HistoryArgs) -> Result<(), AppError> {
    let path = data_path(&args.data);
    let (history, source) = load_history(&path)?;
    note_source(source, &path);

    let product = pipeline::resolve_product(&history.products, args.product.as_deref())?;
    print!("{}", crate::report::format_history(product, &history.bakes));
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let products = default_products();
    let product = pipeline::resolve_product(&products, args.product.as_deref())?;
    let config = simulate_config_from_args(&args, product.id);

    let bakes = generate_sessions(&config, 1)?;
    let history = History {
        products: products.clone(),
        bakes,
    };
    write_history(&args.out, &history)?;
    println!(
        "Wrote {} {} sessions to {}",
        history.bakes.len(),
        product.name,
        args.out.display()
    );
    Ok(())
}

pub fn simulate_config_from_args(args: &SimulateArgs, product_id: ProductId) -> SimulateConfig {
    SimulateConfig {
        product_id,
        count: args.count,
        seed: args.seed,
        start_date: args.start,
        base_friction: args.base_friction,
        friction_per_minute: args.friction_per_minute,
        noise_sd: args.noise,
        blank_prob: args.blank_prob,
    }
}

/// History path: `--data`, else `$DOUGH_DATA` (a `.env` file is honoured), else the default file.
pub fn data_path(args: &DataArgs) -> PathBuf {
    if let Some(path) = &args.data {
        return path.clone();
    }
    dotenvy::dotenv().ok();
    std::env::var_os(DATA_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

fn note_source(source: HistorySource, path: &Path) {
    if source == HistorySource::BuiltIn {
        eprintln!("note: '{}' not found, showing built-in sample sessions", path.display());
    }
}
