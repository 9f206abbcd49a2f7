//! Configuration file support for idose.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/idose/config.toml`.
//!
//! The clinical adjustment magnitudes are point estimates chosen from
//! published guideline ranges, so they live here as policy constants
//! rather than hard-coded values. The defaults match the shipped
//! protocol.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub adjustment: AdjustmentConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub correction: CorrectionConfig,
}

/// In-hospital titration percentages (Module 3 policy)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Basal increase when fasting glucose runs high (guideline range 10-20%)
    #[serde(default = "default_fasting_high_basal_pct")]
    pub fasting_high_basal_pct: f64,

    /// Breakfast bolus increase when pre-lunch glucose runs high
    #[serde(default = "default_pre_lunch_breakfast_pct")]
    pub pre_lunch_breakfast_pct: f64,

    /// Lunch bolus increase when pre-dinner glucose runs high
    #[serde(default = "default_pre_dinner_lunch_pct")]
    pub pre_dinner_lunch_pct: f64,

    /// Dinner bolus increase when post-meal glucose runs high (range 15-20%)
    #[serde(default = "default_post_meal_dinner_pct")]
    pub post_meal_dinner_pct: f64,

    /// Reduction applied to every component when any hypoglycemia occurred
    #[serde(default = "default_hypoglycemia_all_pct")]
    pub hypoglycemia_all_pct: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            fasting_high_basal_pct: default_fasting_high_basal_pct(),
            pre_lunch_breakfast_pct: default_pre_lunch_breakfast_pct(),
            pre_dinner_lunch_pct: default_pre_dinner_lunch_pct(),
            post_meal_dinner_pct: default_post_meal_dinner_pct(),
            hypoglycemia_all_pct: default_hypoglycemia_all_pct(),
        }
    }
}

/// Home regimen conversion factors (Module 2 policy)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Multiplier at 0-1 risk factors (20% reduction)
    #[serde(default = "default_low_risk_factor")]
    pub low_risk_factor: f64,

    /// Multiplier once the risk-factor count reaches the threshold
    #[serde(default = "default_high_risk_factor")]
    pub high_risk_factor: f64,

    /// Risk-factor count at which the deeper reduction applies
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: u32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            low_risk_factor: default_low_risk_factor(),
            high_risk_factor: default_high_risk_factor(),
            high_risk_threshold: default_high_risk_threshold(),
        }
    }
}

/// Correction-only dosing policy (Module 4)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Hold the correction dose entirely below this glucose (mg/dL)
    #[serde(default = "default_hold_below_mg_dl")]
    pub hold_below_mg_dl: f64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            hold_below_mg_dl: default_hold_below_mg_dl(),
        }
    }
}

// Default value functions
fn default_fasting_high_basal_pct() -> f64 {
    15.0
}

fn default_pre_lunch_breakfast_pct() -> f64 {
    12.5
}

fn default_pre_dinner_lunch_pct() -> f64 {
    12.5
}

fn default_post_meal_dinner_pct() -> f64 {
    17.5
}

fn default_hypoglycemia_all_pct() -> f64 {
    -20.0
}

fn default_low_risk_factor() -> f64 {
    0.8
}

fn default_high_risk_factor() -> f64 {
    0.7
}

fn default_high_risk_threshold() -> u32 {
    2
}

fn default_hold_below_mg_dl() -> f64 {
    100.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
        base.join("idose").join("config.toml")
    }

    /// Reject factor values that would scale doses upward or to nothing.
    pub fn validate(&self) -> Result<()> {
        for (name, factor) in [
            ("conversion.low_risk_factor", self.conversion.low_risk_factor),
            ("conversion.high_risk_factor", self.conversion.high_risk_factor),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, factor
                )));
            }
        }
        if self.correction.hold_below_mg_dl <= 0.0 {
            return Err(Error::Config(format!(
                "correction.hold_below_mg_dl must be positive, got {}",
                self.correction.hold_below_mg_dl
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
