//! Shared dose arithmetic used by all four calculators.
//!
//! These are the published-guideline formulas: the 1800-rule insulin
//! sensitivity factor, the correction-dose formula, lenient numeric
//! parsing for free-form input, and percentage adjustment.

/// Numerator of the insulin sensitivity rule (ISF = 1800 / TDD).
pub const ISF_RULE: f64 = 1800.0;

/// Insulin sensitivity factor for a total daily dose.
///
/// Returns `None` when `tdd` is not positive; callers must surface that
/// as an unavailable result rather than dividing through.
pub fn sensitivity_factor(tdd: f64) -> Option<f64> {
    if tdd > 0.0 {
        Some(ISF_RULE / tdd)
    } else {
        None
    }
}

/// Correction dose for a glucose reading: `max(0, (current - target) / isf)`.
///
/// Exactly 0 whenever `current <= target`. A non-positive ISF yields 0
/// as well (the caller has already failed the TDD precondition).
pub fn correction_dose(current: f64, target: f64, isf: f64) -> f64 {
    if isf <= 0.0 {
        return 0.0;
    }
    ((current - target) / isf).max(0.0)
}

/// Interpret free-form numeric text, falling back to `default`.
///
/// Empty, non-numeric, and non-finite input all resolve to the default.
/// Never panics and never lets NaN into the arithmetic.
pub fn parse_numeric(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}

/// Apply a percentage delta to a base dose: `base * (1 + pct / 100)`.
pub fn apply_percent(base: f64, pct: f64) -> f64 {
    base * (1.0 + pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isf_times_tdd_is_rule_constant() {
        for tdd in [1.0, 12.5, 35.0, 45.0, 120.0] {
            let isf = sensitivity_factor(tdd).unwrap();
            assert!((isf * tdd - ISF_RULE).abs() < 1e-9);
        }
    }

    #[test]
    fn test_isf_guards_non_positive_tdd() {
        assert!(sensitivity_factor(0.0).is_none());
        assert!(sensitivity_factor(-10.0).is_none());
    }

    #[test]
    fn test_correction_zero_at_or_below_target() {
        assert_eq!(correction_dose(140.0, 140.0, 40.0), 0.0);
        assert_eq!(correction_dose(90.0, 140.0, 40.0), 0.0);
    }

    #[test]
    fn test_correction_above_target() {
        let dose = correction_dose(200.0, 140.0, 40.0);
        assert!((dose - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_numeric_defaults() {
        assert_eq!(parse_numeric("", 0.0), 0.0);
        assert_eq!(parse_numeric("abc", 100.0), 100.0);
        assert_eq!(parse_numeric("NaN", 5.0), 5.0);
        assert_eq!(parse_numeric("inf", 5.0), 5.0);
    }

    #[test]
    fn test_parse_numeric_accepts_values() {
        assert_eq!(parse_numeric("70", 0.0), 70.0);
        assert_eq!(parse_numeric(" 0.45 ", 0.0), 0.45);
        assert_eq!(parse_numeric("-20", 0.0), -20.0);
    }

    #[test]
    fn test_apply_percent() {
        assert!((apply_percent(20.0, 15.0) - 23.0).abs() < 1e-9);
        assert!((apply_percent(10.0, -20.0) - 8.0).abs() < 1e-9);
        assert_eq!(apply_percent(50.0, 0.0), 50.0);
    }
}
