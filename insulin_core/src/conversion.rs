//! Module 2: conversion from a home insulin regimen to an inpatient
//! starting dose.
//!
//! The home basal and bolus doses are summed into a home TDD, reduced by
//! a risk-factor-counted safety margin, then re-split into basal and
//! per-meal components.

use crate::config::ConversionConfig;
use crate::{Outcome, PatientProfile};
use serde::{Deserialize, Serialize};

/// Inputs for the home regimen conversion (split basal/bolus form).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionInputs {
    pub profile: PatientProfile,
    pub home_basal: f64,
    pub home_bolus: f64,
}

/// Independent risk predicates counted toward the reduction schedule.
const RISK_PREDICATES: &[fn(&PatientProfile) -> bool] = &[
    |p| p.age_years > 65.0,
    |p| p.egfr < 30.0,
    |p| p.liver_dysfunction,
    |p| p.recent_hypoglycemia,
    |p| p.npo,
];

/// Count how many reduction risk factors the patient carries.
pub fn risk_factor_count(profile: &PatientProfile) -> u32 {
    RISK_PREDICATES
        .iter()
        .filter(|predicate| predicate(profile))
        .count() as u32
}

/// Converted inpatient doses, full precision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionDoses {
    pub adjusted_tdd: f64,
    pub basal: f64,
    pub bolus_per_meal: f64,
    pub risk_factors: u32,
    /// Reduction applied to the home TDD, as a positive percentage
    pub reduction_pct: f64,
}

/// Convert a home regimen into an inpatient starting dose.
///
/// Requires the summed home TDD to be positive.
pub fn calculate(inputs: &ConversionInputs, policy: &ConversionConfig) -> Outcome<ConversionDoses> {
    let home_tdd = inputs.home_basal + inputs.home_bolus;
    if home_tdd <= 0.0 {
        return Outcome::Unavailable;
    }

    let risk_factors = risk_factor_count(&inputs.profile);
    let factor = if risk_factors >= policy.high_risk_threshold {
        policy.high_risk_factor
    } else {
        policy.low_risk_factor
    };

    let adjusted_tdd = home_tdd * factor;
    let basal = adjusted_tdd * 0.5;
    let bolus_per_meal = if inputs.profile.eating {
        (adjusted_tdd * 0.5) / 3.0
    } else {
        0.0
    };

    tracing::debug!(
        "Conversion: home_tdd={:.1} risk_factors={} factor={} adjusted={:.2}",
        home_tdd,
        risk_factors,
        factor,
        adjusted_tdd
    );

    Outcome::Computed(ConversionDoses {
        adjusted_tdd,
        basal,
        bolus_per_meal,
        risk_factors,
        reduction_pct: (1.0 - factor) * 100.0,
    })
}
