//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized

use crate::domain::{Bake, Conditions, Product, RegressionModel};
use crate::fit::{FitOutcome, FitReport, ProductSummary};
use crate::models::friction;
use crate::report::{compute_residuals, rmse};

/// `Water = a + b×Room − c×Flour ...`
pub fn format_equation(model: &RegressionModel) -> String {
    let terms = [
        (model.room_coef, "Room"),
        (model.flour_coef, "Flour"),
        (model.levain_coef, "Levain"),
        (model.target_coef, "Target"),
        (model.mix_time_coef, "Mix"),
        (model.hydration_coef, "Hydration"),
    ];

    let mut out = format!("Water = {:.2}", model.intercept);
    for (coef, name) in terms {
        let sign = if coef >= 0.0 { '+' } else { '-' };
        out.push_str(&format!(" {sign} {:.2}×{name}", coef.abs()));
    }
    out
}

/// One-line model status, e.g. for the product table.
pub fn format_status(model: &RegressionModel, sessions_needed: usize) -> String {
    if !model.is_synthetic {
        format!("trained (R²={:.3})", model.r_squared)
    } else if sessions_needed > 0 {
        format!("learning ({sessions_needed} more)")
    } else {
        "heuristic (fit failed)".to_string()
    }
}

/// Qualitative label for a trained model's R².
pub fn fit_quality(r_squared: f64) -> &'static str {
    if r_squared > 0.9 {
        "Excellent"
    } else if r_squared > 0.7 {
        "Good"
    } else {
        "Fair"
    }
}

/// Full model summary: status, equation, coefficients and training residuals.
pub fn format_model_summary(product: &Product, report: &FitReport) -> String {
    let model = &report.model;
    let mut out = String::new();

    out.push_str(&format!("=== dough - water temperature model: {} ===\n", product.name));
    match report.outcome {
        FitOutcome::Fitted => out.push_str(&format!(
            "Status: trained on n={} sessions | R²={:.3} ({})\n",
            model.n_samples,
            model.r_squared,
            fit_quality(model.r_squared)
        )),
        FitOutcome::InsufficientData { have, need } => out.push_str(&format!(
            "Status: still learning | need at least {need} complete sessions, currently have {have} ({} more)\n",
            report.sessions_needed()
        )),
        FitOutcome::SolverFailed => out.push_str(&format!(
            "Status: regression failed on n={} sessions, using the heuristic (try adding more varied data)\n",
            model.n_samples
        )),
    }

    out.push_str(&format!("\n{}\n", format_equation(model)));

    out.push_str("\nCoefficients:\n");
    let rows = [
        ("intercept", model.intercept),
        ("room (°C)", model.room_coef),
        ("flour (°C)", model.flour_coef),
        ("levain (°C)", model.levain_coef),
        ("target (°C)", model.target_coef),
        ("mix (/min)", model.mix_time_coef),
        ("hydration (/%)", model.hydration_coef),
    ];
    for (label, value) in rows {
        out.push_str(&format!("  {label:<15} {value:>10.3}\n"));
    }
    out.push_str(&format!("  {:<15} {:>10.2}\n", "avg friction", model.avg_friction));

    let residuals = compute_residuals(report);
    if let Some(rmse) = rmse(&residuals) {
        out.push_str("\nTraining sessions:\n");
        out.push_str(&format!("  {:>4} {:>9} {:>9} {:>9}\n", "#", "water", "fitted", "residual"));
        for (i, r) in residuals.iter().enumerate() {
            out.push_str(&format!(
                "  {:>4} {:>9.2} {:>9.2} {:>9.2}\n",
                i + 1,
                r.observed,
                r.fitted,
                r.residual
            ));
        }
        out.push_str(&format!("  RMSE={rmse:.3}°C\n"));
    }

    out
}

/// Prediction line plus the inputs it was made from.
pub fn format_prediction(product_name: &str, conditions: &Conditions, prediction: Option<f64>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{product_name}: room={} flour={} levain={} target={} mix={} hydration={}\n",
        fmt_opt(conditions.room_temp),
        fmt_opt(conditions.flour_temp),
        fmt_opt(conditions.levain_temp),
        fmt_opt(conditions.target_temp),
        fmt_opt(conditions.mix_time),
        fmt_opt(conditions.hydration),
    ));
    match prediction {
        Some(water) => out.push_str(&format!("Recommended water temperature: {water:.1}°C\n")),
        None => out.push_str("Recommended water temperature: unavailable\n"),
    }
    out
}

/// Product overview table.
pub fn format_products(summaries: &[ProductSummary]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<16} {:>8} {:>8} {:<24}\n",
            "id", "product", "sessions", "complete", "model"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<16} {:-<8} {:-<8} {:-<24}", "", "", "", "", "").trim_end());
    out.push('\n');

    for s in summaries {
        out.push_str(
            format!(
                "{:>4} {:<16} {:>8} {:>8} {:<24}\n",
                s.product.id.0,
                truncate(&s.product.name, 16),
                s.sessions,
                s.complete,
                format_status(&s.model, s.sessions_needed),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Session history for one product, with the friction diagnostic.
pub fn format_history(product: &Product, bakes: &[Bake]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} sessions:\n", product.name));
    out.push_str(&format!(
        "{:>5} {:<10} {:>6} {:>6} {:>6} {:>6} {:>6} {:>5} {:>5} {:>8}\n",
        "id", "date", "room", "flour", "water", "levain", "final", "mix", "hydr", "friction"
    ));

    let own: Vec<&Bake> = bakes.iter().filter(|b| b.product_id == product.id).collect();
    if own.is_empty() {
        out.push_str("  (no sessions logged)\n");
        return out;
    }

    for b in own {
        out.push_str(&format!(
            "{:>5} {:<10} {:>6} {:>6} {:>6} {:>6} {:>6} {:>5} {:>5} {:>8}\n",
            b.id,
            b.date.to_string(),
            fmt_opt(b.room_temp),
            fmt_opt(b.flour_temp),
            fmt_opt(b.water_temp),
            fmt_opt(b.levain_temp),
            fmt_opt(b.final_temp),
            fmt_opt(b.mix_time),
            fmt_opt(b.hydration),
            fmt_opt(friction(b)),
        ));
    }
    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
