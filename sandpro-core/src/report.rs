//! Result formatting for display.

use crate::error::Result;
use crate::params::Unit;
use crate::types::StressTensorResult;
use std::fmt::Write;

/// Largest precision honoured; `f64` carries no more significant decimals.
pub const MAX_PRECISION: usize = 17;

/// Display labels in Voigt order.
const LABELS: [&str; 6] = ["σxx", "σyy", "σzz", "τxy", "τyz", "τxz"];

/// Format each component on its own line at a fixed number of decimals.
///
/// ```text
/// sigma_xx (σxx) = 5500.00 Psi
/// ```
pub fn format_table(result: &StressTensorResult, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let mut out = String::new();
    for ((name, label), value) in StressTensorResult::COMPONENTS
        .iter()
        .zip(LABELS)
        .zip(result.voigt())
    {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{name} ({label}) = {} {unit}",
            format_value(value, precision),
            unit = Unit::Psi
        );
    }
    out
}

/// Format one value at a fixed number of decimals (at most [`MAX_PRECISION`]).
///
/// Values that round to zero print as `0.00`, never `-0.00`.
pub fn format_value(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let value = clear_negative_zero(value, precision);
    format!("{value:.precision$}")
}

fn clear_negative_zero(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}

/// Pretty-printed JSON object with one key per component.
pub fn format_json(result: &StressTensorResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
