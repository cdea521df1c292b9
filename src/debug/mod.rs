//! Debug bundle writer for inspecting a product's fit.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::Product;
use crate::error::AppError;
use crate::fit::{FitOutcome, FitReport};
use crate::report::{compute_residuals, format_equation};

const COLUMNS: [&str; 6] = ["room", "flour", "levain", "final", "mix", "hydration"];

/// Write a markdown bundle for `report` into `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, product: &Product, report: &FitReport) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::output(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("dough_debug_p{}_{ts}.md", product.id));

    let mut file = File::create(&path)
        .map_err(|e| AppError::output(format!("Failed to create debug file: {e}")))?;
    file.write_all(render_bundle(product, report).as_bytes())
        .map_err(|e| AppError::output(format!("Failed to write debug file: {e}")))?;

    Ok(path)
}

/// Markdown body of a debug bundle.
pub fn render_bundle(product: &Product, report: &FitReport) -> String {
    let model = &report.model;
    let mut out = String::new();

    out.push_str("# dough debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- product: {} (id {})\n", product.name, product.id));
    out.push_str(&format!("- outcome: {}\n", outcome_label(report.outcome)));
    out.push_str(&format!("- n_samples: {}\n", model.n_samples));
    out.push_str(&format!("- avg_friction: {:.4}\n", model.avg_friction));
    out.push_str(&format!("- r_squared: {:.6}\n", model.r_squared));
    out.push_str(&format!("- equation: `{}`\n", format_equation(model)));

    out.push_str("\n## Sessions\n");
    out.push_str("| # | room | flour | water | levain | final | mix | hydration |\n");
    out.push_str("| - | - | - | - | - | - | - | - |\n");
    for (i, s) in report.sessions.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            i + 1,
            s.room_temp,
            s.flour_temp,
            s.water_temp,
            s.levain_temp,
            s.final_temp,
            s.mix_time,
            s.hydration
        ));
    }

    if let Some(scaling) = &report.scaling {
        out.push_str("\n## Column scaling\n");
        out.push_str("| column | mean | std | beta (standardized) |\n");
        out.push_str("| - | - | - | - |\n");
        for (j, name) in COLUMNS.iter().enumerate() {
            let beta = report
                .standardized_beta
                .as_ref()
                .and_then(|b| b.get(j + 1))
                .copied();
            out.push_str(&format!(
                "| {name} | {:.6} | {:.6} | {} |\n",
                scaling.means[j],
                scaling.stds[j],
                fmt_opt(beta)
            ));
        }
        let intercept = report.standardized_beta.as_ref().and_then(|b| b.first()).copied();
        out.push_str(&format!("\nStandardized intercept: {}\n", fmt_opt(intercept)));
    }

    out.push_str("\n## Coefficients (raw units)\n");
    out.push_str(&format!("{}\n", fmt_vec(&model.coefficients())));

    out.push_str("\n## Residuals\n");
    out.push_str("| # | water | fitted | residual |\n");
    out.push_str("| - | - | - | - |\n");
    for (i, r) in compute_residuals(report).iter().enumerate() {
        out.push_str(&format!(
            "| {} | {:.3} | {:.3} | {:.3} |\n",
            i + 1,
            r.observed,
            r.fitted,
            r.residual
        ));
    }

    out
}

fn outcome_label(outcome: FitOutcome) -> String {
    match outcome {
        FitOutcome::Fitted => "fitted".to_string(),
        FitOutcome::SolverFailed => "solver failed (heuristic)".to_string(),
        FitOutcome::InsufficientData { have, need } => format!("insufficient data ({have}/{need})"),
    }
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6}"),
        _ => "-".to_string(),
    }
}
