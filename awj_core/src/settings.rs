//! # Calculator Settings
//!
//! Configuration that shapes a calculation without being part of the input
//! record: unit prices for the cost model and how non-finite results are
//! treated.
//!
//! Settings serialize to JSON. Every field has a default, so a settings file
//! only needs to name what it overrides:
//!
//! ```json
//! {
//!   "cost_rates": { "abrasive_cost_per_kg": 32.5 },
//!   "arithmetic_policy": "Strict"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use awj_core::settings::{ArithmeticPolicy, CalculatorSettings};
//!
//! let settings = CalculatorSettings::from_json(r#"{"arithmetic_policy": "Strict"}"#).unwrap();
//! assert_eq!(settings.arithmetic_policy, ArithmeticPolicy::Strict);
//! assert_eq!(settings.cost_rates.water_cost_per_m3, 100.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default abrasive price (currency/kg)
pub const DEFAULT_ABRASIVE_COST_PER_KG: f64 = 25.0;
/// Default water price (currency/m³)
pub const DEFAULT_WATER_COST_PER_M3: f64 = 100.0;
/// Default electricity price (currency/kWh)
pub const DEFAULT_POWER_COST_PER_KWH: f64 = 4.0;

/// Global calculator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Unit prices for the cost per meter model
    pub cost_rates: CostRates,

    /// What to do when a result field is NaN or infinite
    pub arithmetic_policy: ArithmeticPolicy,
}

impl CalculatorSettings {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    ///
    /// Cost rates must be finite and non-negative.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: CalculatorSettings = serde_json::from_str(json)?;
        settings.cost_rates.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), "loaded calculator settings");
        Ok(settings)
    }
}

/// Unit prices used by the cost per meter model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    /// Abrasive price (currency/kg)
    pub abrasive_cost_per_kg: f64,
    /// Water price (currency/m³)
    pub water_cost_per_m3: f64,
    /// Electricity price (currency/kWh)
    pub power_cost_per_kwh: f64,
}

impl CostRates {
    /// Reject negative or non-finite prices
    pub fn validate(&self) -> CalcResult<()> {
        let rates = [
            ("abrasive_cost_per_kg", self.abrasive_cost_per_kg),
            ("water_cost_per_m3", self.water_cost_per_m3),
            ("power_cost_per_kwh", self.power_cost_per_kwh),
        ];
        for (field, value) in rates {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Cost rate must be a finite, non-negative number",
                ));
            }
        }
        Ok(())
    }
}

impl Default for CostRates {
    fn default() -> Self {
        CostRates {
            abrasive_cost_per_kg: DEFAULT_ABRASIVE_COST_PER_KG,
            water_cost_per_m3: DEFAULT_WATER_COST_PER_M3,
            power_cost_per_kwh: DEFAULT_POWER_COST_PER_KWH,
        }
    }
}

/// Treatment of non-finite results (division by zero, negative fractional bases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArithmeticPolicy {
    /// Return NaN/infinity in the result, as the formulas produce them
    #[default]
    Lenient,
    /// Reject the calculation with [`CalcError::ArithmeticDomain`]
    Strict,
}
