//! Module 1: new insulin initiation with correction dose.
//!
//! Derives the weight-based multiplier tier from patient risk factors,
//! guards multiplier selection against stale tiers, and splits the
//! resulting total daily dose into basal, nutritional, and correction
//! components.

use crate::{primitives, Error, GlucoseReading, Outcome, PatientProfile, Result};
use serde::{Deserialize, Serialize};

/// Weight-based dosing tier for insulin-naive patients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseTier {
    /// Elderly, renal, or hepatic risk: conservative start
    Low,
    Standard,
    /// Insulin resistance expected (obesity, steroids)
    High,
}

impl DoseTier {
    pub fn label(&self) -> &'static str {
        match self {
            DoseTier::Low => "low",
            DoseTier::Standard => "standard",
            DoseTier::High => "high",
        }
    }
}

/// Inputs that drive tier derivation. Changing any of these invalidates
/// a previously selected multiplier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TierInputs {
    pub age_years: f64,
    pub egfr: f64,
    pub liver_dysfunction: bool,
    pub bmi_over_30: bool,
    pub steroid_use: bool,
}

impl From<&PatientProfile> for TierInputs {
    fn from(profile: &PatientProfile) -> Self {
        Self {
            age_years: profile.age_years,
            egfr: profile.egfr,
            liver_dysfunction: profile.liver_dysfunction,
            bmi_over_30: profile.bmi_over_30,
            steroid_use: profile.steroid_use,
        }
    }
}

/// One entry in the ordered tier rule list.
struct TierRule {
    tier: DoseTier,
    applies: fn(&TierInputs) -> bool,
}

/// Tier rules in strict priority order; the first match wins.
const TIER_RULES: &[TierRule] = &[
    TierRule {
        tier: DoseTier::Low,
        applies: |i| i.age_years > 65.0 || i.egfr < 30.0 || i.liver_dysfunction,
    },
    TierRule {
        tier: DoseTier::High,
        applies: |i| i.bmi_over_30 || i.steroid_use,
    },
    TierRule {
        tier: DoseTier::Standard,
        applies: |_| true,
    },
];

/// Derive the dosing tier for a set of tiering inputs.
pub fn tier_for(inputs: &TierInputs) -> DoseTier {
    TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map(|rule| rule.tier)
        // The final rule is a catch-all
        .unwrap_or(DoseTier::Standard)
}

/// Valid multiplier options (units/kg) for a tier.
pub fn multiplier_options(tier: DoseTier) -> [f64; 3] {
    match tier {
        DoseTier::Low => [0.2, 0.25, 0.3],
        DoseTier::Standard => [0.4, 0.45, 0.5],
        DoseTier::High => [0.6, 0.8, 1.0],
    }
}

/// Tracks the current tier inputs and the user's multiplier selection.
///
/// A selection only survives as long as the tiering inputs that produced
/// its option set: any input change resets the selection to none, and a
/// selection outside the current option set is rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiplierPicker {
    inputs: TierInputs,
    selected: Option<f64>,
}

impl MultiplierPicker {
    pub fn new(inputs: TierInputs) -> Self {
        Self {
            inputs,
            selected: None,
        }
    }

    pub fn tier(&self) -> DoseTier {
        tier_for(&self.inputs)
    }

    pub fn options(&self) -> [f64; 3] {
        multiplier_options(self.tier())
    }

    /// Replace the tiering inputs, clearing the selection on any change.
    pub fn set_inputs(&mut self, inputs: TierInputs) {
        if inputs != self.inputs {
            tracing::debug!("Tiering inputs changed, resetting multiplier selection");
            self.inputs = inputs;
            self.selected = None;
        }
    }

    /// Select a multiplier from the current tier's option set.
    pub fn select(&mut self, multiplier: f64) -> Result<()> {
        let options = self.options();
        if !options.iter().any(|o| (o - multiplier).abs() < 1e-9) {
            return Err(Error::Selection(format!(
                "multiplier {} is not an option for the {} tier {:?}",
                multiplier,
                self.tier().label(),
                options
            )));
        }
        self.selected = Some(multiplier);
        Ok(())
    }

    pub fn selected(&self) -> Option<f64> {
        self.selected
    }
}

/// Inputs to the initiation calculation proper.
#[derive(Clone, Debug, PartialEq)]
pub struct InitiationInputs {
    pub profile: PatientProfile,
    /// A multiplier validated against the current tier, or `None` if the
    /// user has not (re-)selected one.
    pub multiplier: Option<f64>,
    pub glucose: GlucoseReading,
}

/// Computed initiation doses, full precision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitiationDoses {
    pub tdd: f64,
    pub basal: f64,
    pub nutritional_per_meal: f64,
    pub isf: f64,
    pub correction: f64,
}

/// Calculate initial dosing for an insulin-naive patient.
///
/// Requires a positive weight and a selected multiplier; otherwise every
/// component is reported unavailable.
pub fn calculate(inputs: &InitiationInputs) -> Outcome<InitiationDoses> {
    let multiplier = match inputs.multiplier {
        Some(m) if m > 0.0 => m,
        _ => return Outcome::Unavailable,
    };
    if inputs.profile.weight_kg <= 0.0 {
        return Outcome::Unavailable;
    }

    let tdd = inputs.profile.weight_kg * multiplier;
    let isf = match primitives::sensitivity_factor(tdd) {
        Some(isf) => isf,
        None => return Outcome::Unavailable,
    };

    let basal = tdd * 0.5;
    let nutritional_per_meal = if inputs.profile.eating {
        (tdd * 0.5) / 3.0
    } else {
        0.0
    };
    let correction = if inputs.glucose.above_target() {
        primitives::correction_dose(
            inputs.glucose.current_mg_dl,
            inputs.glucose.target_mg_dl,
            isf,
        )
    } else {
        0.0
    };

    tracing::debug!(
        "Initiation: tdd={:.2} basal={:.2} nutritional={:.2} isf={:.2}",
        tdd,
        basal,
        nutritional_per_meal,
        isf
    );

    Outcome::Computed(InitiationDoses {
        tdd,
        basal,
        nutritional_per_meal,
        isf,
        correction,
    })
}
