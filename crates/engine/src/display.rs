//! Presentation-only formatting.
//!
//! The calculators keep full precision end to end; the two-decimal currency
//! rounding happens here and nowhere else, so percentages and per-portion
//! figures never divide pre-rounded values.

/// Formats an amount as Brazilian currency, e.g. `R$ 4.50`.
#[must_use]
pub fn brl(amount: f64) -> String {
    if amount < 0.0 {
        format!("-R$ {:.2}", -amount)
    } else {
        format!("R$ {amount:.2}")
    }
}

/// Formats a percentage with one decimal, e.g. `35.2%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_brl() {
        assert_eq!(brl(0.0), "R$ 0.00");
        assert_eq!(brl(4.5), "R$ 4.50");
        assert_eq!(brl(2.714), "R$ 2.71");
        assert_eq!(brl(-10.5), "-R$ 10.50");
    }

    #[test]
    fn formats_percent() {
        assert_eq!(percent(35.200_007), "35.2%");
        assert_eq!(percent(100.0), "100.0%");
    }
}
