//! Two-decimal precision rule and input preconditions.
//!
//! Angle-like values are recorded with at most two decimals. A value that
//! changes when rounded to two decimals is rejected as over-precise rather
//! than silently rounded. Height and built area only need to be finite and
//! non-negative.

use crate::domain::{CalculationInput, Field};
use crate::error::AppError;

/// Tolerance for comparing a value against its two-decimal rounding.
///
/// `0.1 + 0.2` style binary noise must not count as a third decimal.
const EPS: f64 = 1e-9;

/// Round half away from zero to two decimals.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Whether `v` survives a two-decimal rounding unchanged.
pub fn is_two_decimal(v: f64) -> bool {
    v.is_finite() && (round2(v) - v).abs() <= EPS * v.abs().max(1.0)
}

/// Reject non-finite or over-precise values.
pub fn check_two_decimals(field: Field, v: f64) -> Result<f64, AppError> {
    if !v.is_finite() {
        return Err(AppError::input(format!("`{field}` must be a finite number, got {v}.")));
    }
    if !is_two_decimal(v) {
        return Err(AppError::input(format!(
            "`{field}` accepts at most two decimal places, got {v}."
        )));
    }
    Ok(v)
}

fn check_measure(field: Field, v: Option<f64>) -> Result<(), AppError> {
    let Some(v) = v else {
        return Ok(());
    };
    if !v.is_finite() {
        return Err(AppError::input(format!("`{field}` must be a finite number, got {v}.")));
    }
    if v < 0.0 {
        return Err(AppError::input(format!("`{field}` cannot be negative, got {v}.")));
    }
    Ok(())
}

/// Caller preconditions checked before any evaluator runs.
pub fn validate_input(input: &CalculationInput) -> Result<(), AppError> {
    check_measure(Field::TotalHeight, input.total_height)?;
    check_measure(Field::BuiltArea, input.built_area)?;
    if input.municipality.trim().is_empty() {
        return Err(AppError::input("`municipality` cannot be blank."));
    }
    Ok(())
}
