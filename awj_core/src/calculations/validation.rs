//! # Parameter Validation
//!
//! Range checks run before a calculation. All checks are independent: every
//! violation is collected, in check order, so a form can show them together.
//!
//! | Check | Accepted range |
//! |-------|----------------|
//! | thickness | (0, 500] mm |
//! | pressure | [100, 600] MPa |
//! | abrasive flow | [1, 20] g/s |
//! | nozzle vs focus | nozzle < focus diameter |
//!
//! Nothing else is rejected. In particular an unknown material key passes;
//! the engine calculates it as steel. [`advisories`] reports such cases
//! without blocking.

use serde::{Deserialize, Serialize};

use super::awj::AwjInput;
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialType;

/// Thickness limits (mm); the lower bound is exclusive
pub const MAX_THICKNESS_MM: f64 = 500.0;
/// Pressure limits (MPa), inclusive
pub const MIN_PRESSURE_MPA: f64 = 100.0;
pub const MAX_PRESSURE_MPA: f64 = 600.0;
/// Abrasive flow limits (g/s), inclusive
pub const MIN_ABRASIVE_FLOW_GS: f64 = 1.0;
pub const MAX_ABRASIVE_FLOW_GS: f64 = 20.0;

/// Pressure above which brittle materials tend to chip (MPa)
pub const BRITTLE_PRESSURE_LIMIT_MPA: f64 = 400.0;

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Input field the check is about
    pub field: String,
    /// Offending value
    pub value: f64,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Violation {
            field: field.into(),
            value,
            message: message.into(),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Failed checks in check order; empty when the input is valid
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no check failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in check order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Convert into a result, failing with every violation at once
    pub fn into_result(self) -> CalcResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CalcError::ValidationFailed {
                violations: self.violations,
            })
        }
    }
}

/// Check an input record against the accepted parameter ranges.
///
/// Ranges are written as "inside" tests, so NaN values fail them.
pub fn validate(input: &AwjInput) -> ValidationReport {
    let mut violations = Vec::new();

    let t = input.thickness_mm;
    if !(t > 0.0 && t <= MAX_THICKNESS_MM) {
        violations.push(Violation::new(
            "thickness_mm",
            t,
            "Thickness out of range: must be greater than 0 and at most 500 mm",
        ));
    }

    let p = input.pressure_mpa;
    if !(MIN_PRESSURE_MPA..=MAX_PRESSURE_MPA).contains(&p) {
        violations.push(Violation::new(
            "pressure_mpa",
            p,
            "Pressure out of range: must be between 100 and 600 MPa",
        ));
    }

    let af = input.abrasive_flow_gs;
    if !(MIN_ABRASIVE_FLOW_GS..=MAX_ABRASIVE_FLOW_GS).contains(&af) {
        violations.push(Violation::new(
            "abrasive_flow_gs",
            af,
            "Abrasive flow out of range: must be between 1 and 20 g/s",
        ));
    }

    if !(input.nozzle_diameter_mm < input.focus_diameter_mm) {
        violations.push(Violation::new(
            "focus_diameter_mm",
            input.focus_diameter_mm,
            "Focus diameter must be larger than nozzle diameter",
        ));
    }

    ValidationReport { violations }
}

/// Non-blocking recommendations for an input record.
///
/// These never stop a calculation; they flag inputs that are legal but
/// probably not what the operator intended.
pub fn advisories(input: &AwjInput) -> Vec<String> {
    let mut notes = Vec::new();

    match MaterialType::from_record_key(&input.material) {
        Some(material) => {
            if material.is_brittle() && input.pressure_mpa > BRITTLE_PRESSURE_LIMIT_MPA {
                notes.push(format!(
                    "{} is brittle; a pressure of at most {} MPa is recommended (got {} MPa)",
                    material, BRITTLE_PRESSURE_LIMIT_MPA, input.pressure_mpa
                ));
            }
        }
        None => {
            notes.push(format!(
                "Unknown material '{}'; calculated with steel properties",
                input.material
            ));
        }
    }

    notes
}
