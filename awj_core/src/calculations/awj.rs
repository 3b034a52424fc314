//! # AWJ Process Calculation
//!
//! Turns one set of process parameters into the derived cutting quantities.
//! The pipeline is strictly sequential and every stage is a pure function from
//! [`crate::equations`]:
//!
//! 1. Water flow (nozzle diameter, pressure)
//! 2. Hydraulic power (pressure, water flow)
//! 3. Cutting speed (material, thickness, pressure, abrasive flow, geometry)
//! 4. Cut depth (material, pressure, abrasive flow, cutting speed)
//! 5. Surface roughness (material, cutting speed, abrasive flow, mesh)
//! 6. Cost per meter (abrasive flow, cutting speed, water flow, power, rates)
//!
//! followed by the extended jet metrics. Stages consume the *rounded* outputs
//! of earlier stages.
//!
//! ## Entry Points
//!
//! - [`perform_full_calculation`] - the raw pipeline with default cost rates.
//!   No validation; degenerate inputs yield NaN/infinite fields.
//! - [`calculate`] - validates first, uses the configured rates, and applies
//!   the configured [`ArithmeticPolicy`].
//!
//! ## Example
//!
//! ```rust
//! use awj_core::calculations::awj::{calculate, AwjInput};
//! use awj_core::settings::CalculatorSettings;
//!
//! let input = AwjInput::new("aluminum", 20.0, 350.0).with_abrasive_flow(10.0);
//! let result = calculate(&input, &CalculatorSettings::default()).unwrap();
//!
//! assert!(result.cutting_speed_mm_min >= 2.0 && result.cutting_speed_mm_min <= 5000.0);
//! assert!(result.surface_roughness_um >= 0.5 && result.surface_roughness_um <= 20.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::validate;
use crate::equations::{self, cutting::DEFAULT_MESH_SIZE};
use crate::errors::{CalcError, CalcResult};
use crate::materials::lookup_material;
use crate::settings::{ArithmeticPolicy, CalculatorSettings, CostRates};
use crate::units::non_finite;

/// Material used when none is given
pub const DEFAULT_MATERIAL: &str = "steel";
/// Default water nozzle diameter (mm)
pub const DEFAULT_NOZZLE_DIAMETER_MM: f64 = 0.33;
/// Default focus tube diameter (mm)
pub const DEFAULT_FOCUS_DIAMETER_MM: f64 = 1.0;
/// Default focus tube length (mm)
pub const DEFAULT_FOCUS_LENGTH_MM: f64 = 76.0;
/// Default abrasive flow (g/s)
pub const DEFAULT_ABRASIVE_FLOW_GS: f64 = 8.0;

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

fn default_nozzle_diameter() -> f64 {
    DEFAULT_NOZZLE_DIAMETER_MM
}

fn default_focus_diameter() -> f64 {
    DEFAULT_FOCUS_DIAMETER_MM
}

fn default_focus_length() -> f64 {
    DEFAULT_FOCUS_LENGTH_MM
}

fn default_abrasive_flow() -> f64 {
    DEFAULT_ABRASIVE_FLOW_GS
}

fn default_mesh_size() -> f64 {
    DEFAULT_MESH_SIZE
}

/// Process parameters for one cut.
///
/// Only `thickness_mm` and `pressure_mpa` are required; every other field
/// takes its default when absent from JSON.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "steel",
///   "thickness_mm": 10.0,
///   "pressure_mpa": 300.0,
///   "nozzle_diameter_mm": 0.33,
///   "focus_diameter_mm": 1.0,
///   "focus_length_mm": 76.0,
///   "abrasive_flow_gs": 8.0,
///   "mesh_size": 80.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwjInput {
    /// Material key (e.g., "steel"). Unknown keys are calculated as steel.
    #[serde(default = "default_material")]
    pub material: String,

    /// Workpiece thickness (mm)
    pub thickness_mm: f64,

    /// Pump pressure (MPa)
    pub pressure_mpa: f64,

    /// Water nozzle (orifice) diameter (mm)
    #[serde(default = "default_nozzle_diameter")]
    pub nozzle_diameter_mm: f64,

    /// Focus tube diameter (mm), must exceed the nozzle diameter
    #[serde(default = "default_focus_diameter")]
    pub focus_diameter_mm: f64,

    /// Focus tube length (mm). Carried for records; no formula uses it.
    #[serde(default = "default_focus_length")]
    pub focus_length_mm: f64,

    /// Abrasive mass flow (g/s)
    #[serde(default = "default_abrasive_flow")]
    pub abrasive_flow_gs: f64,

    /// Abrasive grit (mesh number). Only affects roughness.
    #[serde(default = "default_mesh_size")]
    pub mesh_size: f64,
}

impl AwjInput {
    /// Create an input with default nozzle geometry, abrasive flow and mesh.
    pub fn new(material: impl Into<String>, thickness_mm: f64, pressure_mpa: f64) -> Self {
        AwjInput {
            material: material.into(),
            thickness_mm,
            pressure_mpa,
            nozzle_diameter_mm: DEFAULT_NOZZLE_DIAMETER_MM,
            focus_diameter_mm: DEFAULT_FOCUS_DIAMETER_MM,
            focus_length_mm: DEFAULT_FOCUS_LENGTH_MM,
            abrasive_flow_gs: DEFAULT_ABRASIVE_FLOW_GS,
            mesh_size: DEFAULT_MESH_SIZE,
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_thickness(mut self, thickness_mm: f64) -> Self {
        self.thickness_mm = thickness_mm;
        self
    }

    pub fn with_pressure(mut self, pressure_mpa: f64) -> Self {
        self.pressure_mpa = pressure_mpa;
        self
    }

    pub fn with_nozzle_diameter(mut self, nozzle_diameter_mm: f64) -> Self {
        self.nozzle_diameter_mm = nozzle_diameter_mm;
        self
    }

    pub fn with_focus_diameter(mut self, focus_diameter_mm: f64) -> Self {
        self.focus_diameter_mm = focus_diameter_mm;
        self
    }

    pub fn with_focus_length(mut self, focus_length_mm: f64) -> Self {
        self.focus_length_mm = focus_length_mm;
        self
    }

    pub fn with_abrasive_flow(mut self, abrasive_flow_gs: f64) -> Self {
        self.abrasive_flow_gs = abrasive_flow_gs;
        self
    }

    pub fn with_mesh_size(mut self, mesh_size: f64) -> Self {
        self.mesh_size = mesh_size;
        self
    }
}

/// Derived quantities for one cut.
///
/// ## JSON Example
///
/// ```json
/// {
///   "water_flow_lpm": 2.58,
///   "hydraulic_power_kw": 12.9,
///   "cutting_speed_mm_min": 5000.0,
///   "cut_depth_mm": 3878.55,
///   "surface_roughness_um": 4.67,
///   "cost_per_meter": 2.62,
///   "extended": {
///     "water_velocity_m_s": 774.6,
///     "kinetic_energy_j_m3": 300000000.0,
///     "mass_flow_rate_kg_s": 0.043,
///     "abrasive_ratio": 0.186,
///     "specific_energy": 2.58
///   }
/// }
/// ```
///
/// Under the lenient policy a field can be NaN or infinite. Such values are
/// written as the strings `"NaN"`, `"inf"` and `"-inf"` and read back
/// unchanged; see [`non_finite`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwjResult {
    /// Water flow (l/min), 2 decimals
    #[serde(with = "non_finite")]
    pub water_flow_lpm: f64,
    /// Hydraulic power (kW), 2 decimals
    #[serde(with = "non_finite")]
    pub hydraulic_power_kw: f64,
    /// Traverse speed (mm/min), in [2, 5000], 1 decimal
    #[serde(with = "non_finite")]
    pub cutting_speed_mm_min: f64,
    /// Maximum depth of cut (mm), 2 decimals
    #[serde(with = "non_finite")]
    pub cut_depth_mm: f64,
    /// Surface roughness Ra (µm), in [0.5, 20], 2 decimals
    #[serde(with = "non_finite")]
    pub surface_roughness_um: f64,
    /// Consumable cost per meter of cut (currency/m), 2 decimals
    #[serde(with = "non_finite")]
    pub cost_per_meter: f64,
    /// Jet metrics derived from the above
    pub extended: ExtendedResults,
}

/// Extended jet metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedResults {
    /// Ideal jet velocity (m/s), 2 decimals
    #[serde(with = "non_finite")]
    pub water_velocity_m_s: f64,
    /// Specific kinetic energy ½ρv² (J/m³), 2 decimals
    #[serde(with = "non_finite")]
    pub kinetic_energy_j_m3: f64,
    /// Water mass flow (kg/s), 4 decimals
    #[serde(with = "non_finite")]
    pub mass_flow_rate_kg_s: f64,
    /// Abrasive to water mass ratio, 3 decimals
    #[serde(with = "non_finite")]
    pub abrasive_ratio: f64,
    /// Hydraulic energy per unit cut length (W per mm/min), 2 decimals
    #[serde(with = "non_finite")]
    pub specific_energy: f64,
}

impl AwjResult {
    /// Every numeric field with its name, in pipeline order.
    pub fn named_values(&self) -> [(&'static str, f64); 11] {
        [
            ("water_flow_lpm", self.water_flow_lpm),
            ("hydraulic_power_kw", self.hydraulic_power_kw),
            ("cutting_speed_mm_min", self.cutting_speed_mm_min),
            ("cut_depth_mm", self.cut_depth_mm),
            ("surface_roughness_um", self.surface_roughness_um),
            ("cost_per_meter", self.cost_per_meter),
            ("water_velocity_m_s", self.extended.water_velocity_m_s),
            ("kinetic_energy_j_m3", self.extended.kinetic_energy_j_m3),
            ("mass_flow_rate_kg_s", self.extended.mass_flow_rate_kg_s),
            ("abrasive_ratio", self.extended.abrasive_ratio),
            ("specific_energy", self.extended.specific_energy),
        ]
    }

    /// First field (in pipeline order) that is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        self.named_values().into_iter().find(|(_, v)| !v.is_finite())
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }
}

/// Run the full pipeline with default cost rates.
///
/// No validation is performed and nothing is rejected: out-of-domain inputs
/// produce NaN or infinite fields. Call [`validate`] first, or use
/// [`calculate`].
pub fn perform_full_calculation(input: &AwjInput) -> AwjResult {
    perform_full_calculation_with_rates(input, &CostRates::default())
}

/// Run the full pipeline with the given cost rates.
pub fn perform_full_calculation_with_rates(input: &AwjInput, rates: &CostRates) -> AwjResult {
    let material = lookup_material(&input.material);
    let pressure = input.pressure_mpa;
    let abrasive_flow = input.abrasive_flow_gs;

    // 1-2. Hydraulics
    let water_flow = equations::water_flow_lpm(input.nozzle_diameter_mm, pressure);
    let hydraulic_power = equations::hydraulic_power_kw(pressure, water_flow);

    // 3-5. Cutting models
    let cutting_speed = equations::cutting_speed_mm_min(
        &material,
        input.thickness_mm,
        pressure,
        abrasive_flow,
        input.nozzle_diameter_mm,
        input.focus_diameter_mm,
    );
    let cut_depth = equations::cut_depth_mm(&material, pressure, abrasive_flow, cutting_speed);
    let surface_roughness =
        equations::surface_roughness_um(&material, cutting_speed, abrasive_flow, input.mesh_size);

    // 6. Cost
    let cost_per_meter =
        equations::cost_per_meter(abrasive_flow, cutting_speed, water_flow, hydraulic_power, rates);

    let extended = ExtendedResults {
        water_velocity_m_s: equations::jet_velocity_m_s(pressure),
        kinetic_energy_j_m3: equations::kinetic_energy_density(pressure),
        mass_flow_rate_kg_s: equations::mass_flow_rate_kg_s(water_flow),
        abrasive_ratio: equations::abrasive_ratio(abrasive_flow, water_flow),
        specific_energy: equations::specific_energy(hydraulic_power, cutting_speed),
    };

    debug!(
        material = %input.material,
        water_flow,
        hydraulic_power,
        cutting_speed,
        cut_depth,
        surface_roughness,
        cost_per_meter,
        "awj calculation"
    );

    AwjResult {
        water_flow_lpm: water_flow,
        hydraulic_power_kw: hydraulic_power,
        cutting_speed_mm_min: cutting_speed,
        cut_depth_mm: cut_depth,
        surface_roughness_um: surface_roughness,
        cost_per_meter,
        extended,
    }
}

/// Validate, calculate with the configured rates, and apply the arithmetic policy.
///
/// # Returns
///
/// * `Ok(AwjResult)` - Calculation results
/// * `Err(CalcError::ValidationFailed)` - Input out of range (all violations listed)
/// * `Err(CalcError::ArithmeticDomain)` - A field is non-finite and the policy is `Strict`
pub fn calculate(input: &AwjInput, settings: &CalculatorSettings) -> CalcResult<AwjResult> {
    validate(input).into_result()?;

    let result = perform_full_calculation_with_rates(input, &settings.cost_rates);

    if settings.arithmetic_policy == ArithmeticPolicy::Strict {
        if let Some((quantity, value)) = result.first_non_finite() {
            warn!(quantity, %value, "rejecting non-finite calculation result");
            return Err(CalcError::arithmetic_domain(quantity, value));
        }
    }

    Ok(result)
}
