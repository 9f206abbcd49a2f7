#![forbid(unsafe_code)]

//! Core rule engine for inpatient insulin dosing.
//!
//! This crate provides:
//! - Shared dose arithmetic (ISF, correction formula, lenient parsing)
//! - Four independent dose calculators (initiation, home conversion,
//!   in-hospital adjustment, correction-only)
//! - Summary document generation for export
//! - Policy configuration
//!
//! All calculators are pure functions of their inputs. Missing or
//! malformed numeric input resolves to a documented default and surfaces
//! as an `Outcome::Unavailable` result, never a panic.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod primitives;
pub mod initiation;
pub mod conversion;
pub mod adjustment;
pub mod correction;
pub mod report;
pub mod summary;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use initiation::{DoseTier, InitiationDoses, InitiationInputs, MultiplierPicker};
pub use conversion::{ConversionDoses, ConversionInputs};
pub use adjustment::{AdjustedRegimen, AdjustmentInputs};
pub use correction::{CorrectionInputs, CorrectionResult};
pub use summary::SummaryRequest;
