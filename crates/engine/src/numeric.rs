//! Numeric intake for form-entered values.
//!
//! Two regimes, matching how the source forms behaved:
//!
//! - [`parse_amount`] / [`required`] are strict: unparseable text raises
//!   [`InvalidInput`]. Used for every required numeric field.
//! - [`coerce_amount`] / [`lenient`] are best-effort: unparseable or empty
//!   text becomes 0 and negatives are clamped to 0, never an error. Used
//!   only for ingredient-line quantity and unit cost.
//!
//! Values are kept at full `f64` precision; rounding happens only in the
//! presentation helpers.
//!
//! [`InvalidInput`]: EngineError::InvalidInput

use api_types::NumberOrText;

use crate::{EngineError, ResultEngine};

/// Parses a required decimal string.
///
/// Only the standard numeric parser is used: `.` is the decimal separator
/// and a decimal comma is **not** auto-detected.
pub fn parse_amount(raw: &str, label: &str) -> ResultEngine<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("empty {label}")));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("invalid {label}: \"{trimmed}\"")))?;
    if !value.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "non-finite {label}: \"{trimmed}\""
        )));
    }
    Ok(value)
}

/// Best-effort coercion for ingredient-line fields. Unparseable or empty
/// text becomes 0; negatives are clamped to 0.
pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => clamp_non_negative(value),
        _ => 0.0,
    }
}

/// Negative quantities and prices are outside the domain; clamp to 0.
/// Also maps NaN to 0.
pub fn clamp_non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Strict read of a form numeric field.
pub(crate) fn required(field: &NumberOrText, label: &str) -> ResultEngine<f64> {
    match field {
        NumberOrText::Number(value) if value.is_finite() => Ok(*value),
        NumberOrText::Number(value) => Err(EngineError::InvalidInput(format!(
            "non-finite {label}: {value}"
        ))),
        NumberOrText::Text(raw) => parse_amount(raw, label),
    }
}

/// Lenient read of a form numeric field (ingredient lines only).
pub(crate) fn lenient(field: &NumberOrText) -> f64 {
    match field {
        NumberOrText::Number(value) if value.is_finite() => clamp_non_negative(*value),
        NumberOrText::Number(_) => 0.0,
        NumberOrText::Text(raw) => coerce_amount(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_decimals() {
        assert_eq!(parse_amount("2.36", "cost").unwrap(), 2.36);
        assert_eq!(parse_amount(" -15 ", "margin").unwrap(), -15.0);
    }

    #[test]
    fn parse_rejects_garbage_and_empty() {
        assert!(matches!(
            parse_amount("", "cost"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_amount("abc", "cost"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_amount("NaN", "cost"),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn parse_does_not_accept_decimal_comma() {
        // A single standard parser, no locale detection.
        assert!(parse_amount("4,50", "cost").is_err());
    }

    #[test]
    fn coerce_never_fails() {
        assert_eq!(coerce_amount("5"), 5.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("-3.2"), 0.0);
    }
}
