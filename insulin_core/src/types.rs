//! Core domain types for the insulin dosing engine.
//!
//! Every entity here is an immutable value record, constructed fresh for
//! a single calculation and discarded afterwards. There is no identity
//! or caching across calls.

use serde::{Deserialize, Serialize};

/// eGFR assumed when the renal function field is absent.
pub const DEFAULT_EGFR: f64 = 100.0;

/// Glucose target assumed when the target field is absent (mg/dL).
pub const DEFAULT_TARGET_GLUCOSE: f64 = 140.0;

/// Patient-level inputs shared by the calculators.
///
/// Numeric fields are already-parsed values; callers route free-form
/// input through [`crate::primitives::parse_numeric`] so absent or
/// malformed entries land on the documented defaults instead of NaN.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub weight_kg: f64,
    pub age_years: f64,
    #[serde(default = "default_egfr")]
    pub egfr: f64,
    #[serde(default)]
    pub liver_dysfunction: bool,
    #[serde(default)]
    pub bmi_over_30: bool,
    #[serde(default)]
    pub steroid_use: bool,
    #[serde(default)]
    pub eating: bool,
    #[serde(default)]
    pub recent_hypoglycemia: bool,
    #[serde(default)]
    pub npo: bool,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            weight_kg: 0.0,
            age_years: 0.0,
            egfr: DEFAULT_EGFR,
            liver_dysfunction: false,
            bmi_over_30: false,
            steroid_use: false,
            eating: false,
            recent_hypoglycemia: false,
            npo: false,
        }
    }
}

fn default_egfr() -> f64 {
    DEFAULT_EGFR
}

/// A point-in-time glucose reading with its treatment target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    pub current_mg_dl: f64,
    #[serde(default = "default_target")]
    pub target_mg_dl: f64,
}

impl GlucoseReading {
    pub fn new(current_mg_dl: f64, target_mg_dl: f64) -> Self {
        Self {
            current_mg_dl,
            target_mg_dl,
        }
    }

    /// True when the reading is elevated above its target.
    pub fn above_target(&self) -> bool {
        self.current_mg_dl > self.target_mg_dl
    }
}

impl Default for GlucoseReading {
    fn default() -> Self {
        Self {
            current_mg_dl: 0.0,
            target_mg_dl: DEFAULT_TARGET_GLUCOSE,
        }
    }
}

fn default_target() -> f64 {
    DEFAULT_TARGET_GLUCOSE
}

/// Tagged calculator result: a computed dose record, or an explicit
/// marker that the preconditions were not met.
///
/// This replaces placeholder strings in output records, so downstream
/// consumers can never format a sentinel as a number by accident.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "doses", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Preconditions held and doses were computed.
    Computed(T),
    /// Insufficient input (e.g., missing weight or TDD of zero).
    Unavailable,
}

impl<T> Outcome<T> {
    /// Get the computed record, if any.
    pub fn computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Outcome::Unavailable)
    }
}
