//! Module 4: standalone correction dose from TDD and a glucose reading.
//!
//! Below the hold threshold the dose is withheld outright, regardless of
//! what the formula would produce.

use crate::config::CorrectionConfig;
use crate::{primitives, GlucoseReading, Outcome};
use serde::{Deserialize, Serialize};

/// Inputs for the correction-only calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionInputs {
    pub tdd: f64,
    pub glucose: GlucoseReading,
}

/// Computed correction dose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub isf: f64,
    /// Exact formula value, full precision
    pub dose_exact: f64,
    /// Rounded to the nearest whole unit; the clinically actionable dose
    pub dose_units: u32,
    /// Dose must not be given when set, whatever the arithmetic says
    pub hold: bool,
}

/// Calculate a standalone correction dose.
///
/// Requires a positive TDD and a positive current glucose.
pub fn calculate(inputs: &CorrectionInputs, policy: &CorrectionConfig) -> Outcome<CorrectionResult> {
    if inputs.glucose.current_mg_dl <= 0.0 {
        return Outcome::Unavailable;
    }
    let isf = match primitives::sensitivity_factor(inputs.tdd) {
        Some(isf) => isf,
        None => return Outcome::Unavailable,
    };

    let hold = inputs.glucose.current_mg_dl < policy.hold_below_mg_dl;
    let dose_exact = if hold {
        0.0
    } else {
        primitives::correction_dose(
            inputs.glucose.current_mg_dl,
            inputs.glucose.target_mg_dl,
            isf,
        )
    };

    if hold {
        tracing::info!(
            "Glucose {:.0} mg/dL below hold threshold {:.0}, correction withheld",
            inputs.glucose.current_mg_dl,
            policy.hold_below_mg_dl
        );
    }

    Outcome::Computed(CorrectionResult {
        isf,
        dose_exact,
        dose_units: dose_exact.round() as u32,
        hold,
    })
}
