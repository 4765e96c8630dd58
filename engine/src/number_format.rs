//! FILENAME: engine/src/number_format.rs
//! PURPOSE: Number rounding and formatting for displaying results.
//! CONTEXT: This module converts a raw floating point result into the
//! canonical display string: integers print with no decimal point, decimals
//! print with trailing zeros stripped.

/// Scale factor for rounding results to 10 decimal digits.
const ROUND_FACTOR: f64 = 1e10;

/// Rounds a raw result to 10 decimal digits of precision, absorbing
/// floating point noise so that e.g. 0.1 + 0.2 displays as 0.3.
pub fn round_result(value: f64) -> f64 {
    let scaled = value * ROUND_FACTOR;
    if scaled.is_finite() {
        scaled.round() / ROUND_FACTOR
    } else {
        // Magnitudes too large to scale are already noise-free at this
        // precision.
        value
    }
}

/// Formats a result for display.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // For integers, don't show a decimal point
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    // For decimals, show up to 10 decimal digits but trim trailing zeros
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
