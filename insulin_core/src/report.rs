//! Boundary formatting of calculator outcomes.
//!
//! Doses render to one decimal place and the ISF to zero; an
//! [`Outcome::Unavailable`] renders every line with the `--` sentinel.
//! Internally the engine keeps full precision — rounding only happens
//! here, at the presentation seam.

use crate::adjustment::AdjustedRegimen;
use crate::conversion::ConversionDoses;
use crate::correction::CorrectionResult;
use crate::initiation::InitiationDoses;
use crate::Outcome;

/// Sentinel shown when preconditions were not met.
pub const UNAVAILABLE: &str = "--";

/// Format a dose to one decimal place with its unit.
pub fn format_units(value: f64) -> String {
    format!("{:.1} units", value)
}

/// Format an insulin sensitivity factor to zero decimals.
pub fn format_isf(value: f64) -> String {
    format!("{:.0} mg/dL/unit", value)
}

fn lines_from(pairs: Vec<(&str, String)>) -> Vec<String> {
    pairs
        .into_iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect()
}

fn unavailable_lines(labels: &[&str]) -> Vec<String> {
    labels
        .iter()
        .map(|label| format!("{}: {}", label, UNAVAILABLE))
        .collect()
}

/// Report lines for a Module 1 (initiation) outcome.
pub fn initiation_lines(outcome: &Outcome<InitiationDoses>) -> Vec<String> {
    match outcome.computed() {
        Some(doses) => lines_from(vec![
            ("Total Daily Dose (TDD)", format_units(doses.tdd)),
            ("Basal Insulin", format_units(doses.basal)),
            (
                "Nutritional Insulin (per meal)",
                format_units(doses.nutritional_per_meal),
            ),
            ("Insulin Sensitivity Factor", format_isf(doses.isf)),
            ("Correction Dose", format_units(doses.correction)),
        ]),
        None => unavailable_lines(&[
            "Total Daily Dose (TDD)",
            "Basal Insulin",
            "Nutritional Insulin (per meal)",
            "Insulin Sensitivity Factor",
            "Correction Dose",
        ]),
    }
}

/// Report lines for a Module 2 (home conversion) outcome.
pub fn conversion_lines(outcome: &Outcome<ConversionDoses>) -> Vec<String> {
    match outcome.computed() {
        Some(doses) => lines_from(vec![
            ("Adjusted TDD", format_units(doses.adjusted_tdd)),
            ("Basal Insulin", format_units(doses.basal)),
            (
                "Nutritional Insulin (per meal)",
                format_units(doses.bolus_per_meal),
            ),
            ("Risk Factors", doses.risk_factors.to_string()),
            ("Reduction Applied", format!("{:.0}%", doses.reduction_pct)),
        ]),
        None => unavailable_lines(&[
            "Adjusted TDD",
            "Basal Insulin",
            "Nutritional Insulin (per meal)",
            "Risk Factors",
            "Reduction Applied",
        ]),
    }
}

/// Report lines for a Module 3 (in-hospital adjustment) outcome,
/// including one line per recommendation.
pub fn adjustment_lines(outcome: &Outcome<AdjustedRegimen>) -> Vec<String> {
    match outcome.computed() {
        Some(regimen) => {
            let mut lines = lines_from(vec![
                ("New Basal", format_units(regimen.basal)),
                ("New Breakfast Bolus", format_units(regimen.breakfast)),
                ("New Lunch Bolus", format_units(regimen.lunch)),
                ("New Dinner Bolus", format_units(regimen.dinner)),
                ("New TDD", format_units(regimen.new_tdd)),
            ]);
            for recommendation in &regimen.recommendations {
                lines.push(format!("Recommendation: {}", recommendation));
            }
            lines
        }
        None => unavailable_lines(&[
            "New Basal",
            "New Breakfast Bolus",
            "New Lunch Bolus",
            "New Dinner Bolus",
            "New TDD",
        ]),
    }
}

/// Report lines for a Module 4 (correction-only) outcome.
pub fn correction_lines(outcome: &Outcome<CorrectionResult>) -> Vec<String> {
    match outcome.computed() {
        Some(result) => lines_from(vec![
            ("Insulin Sensitivity Factor", format_isf(result.isf)),
            ("Correction Dose (exact)", format_units(result.dose_exact)),
            (
                "Correction Dose (rounded)",
                format!("{} units", result.dose_units),
            ),
            (
                "Hold Correction",
                if result.hold { "yes" } else { "no" }.to_string(),
            ),
        ]),
        None => unavailable_lines(&[
            "Insulin Sensitivity Factor",
            "Correction Dose (exact)",
            "Correction Dose (rounded)",
            "Hold Correction",
        ]),
    }
}
