//! Formatted terminal output.
//!
//! Formatting lives in one place so the calculator and selector stay free of
//! presentation concerns.

use crate::domain::{CurtainType, Measurement, QuantityResult, SelectedPrice};

/// Render a price as a two-decimal dollar amount (`30` -> `$30.00`).
pub fn format_currency(price: f64) -> String {
    if price < 0.0 {
        format!("-${:.2}", -price)
    } else {
        format!("${price:.2}")
    }
}

/// Format a number without trailing zeros beyond what is needed.
fn format_quantity(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Format a curtain calculation.
pub fn format_quantities(measurement: Measurement, curtain: CurtainType, result: &QuantityResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} ({}mm x {}mm) ===\n",
        curtain.display_name(),
        format_quantity(measurement.width_mm),
        format_quantity(measurement.drop_mm)
    ));
    for (name, value) in result.entries() {
        out.push_str(&format!("{name:<13}{} m\n", format_quantity(value)));
    }
    out
}

/// Format a price lookup.
pub fn format_price_selection(track_width: f64, selected: &SelectedPrice) -> String {
    let mut out = String::new();
    out.push_str("=== Track Price ===\n");
    out.push_str(&format!("Required width: {} mm\n", format_quantity(track_width)));
    out.push_str(&format!(
        "Selected width: {} mm",
        format_quantity(selected.selected_track_width)
    ));
    if selected.selected_track_width < track_width {
        out.push_str(" (widest available)");
    }
    out.push('\n');
    out.push_str(&format!("Track price:    {}\n", format_currency(selected.track_price)));
    out
}
