//! # Waterjet Equations
//!
//! Every formula the calculation pipeline uses, one pure function per stage.
//! Keeping them apart from the pipeline makes each stage testable on its own
//! and keeps the calibrated constants in one place.
//!
//! ## Modules
//!
//! - [`hydraulics`] - Orifice flow, hydraulic power, jet energy metrics
//! - [`cutting`] - Empirical cutting speed, cut depth and roughness models
//! - [`cost`] - Consumable cost per meter of cut
//!
//! ## Rounding
//!
//! Each stage rounds its output to a fixed number of decimals before the next
//! stage consumes it. Later stages depend on the *rounded* value, so the
//! rounding is part of the model, not presentation.
//!
//! ## Non-finite Values
//!
//! No formula here guards against division by zero or fractional powers of
//! negative numbers. They return NaN or infinity and [`round_to`] passes those
//! through unchanged; rejecting them is the caller's decision (see
//! [`ArithmeticPolicy`](crate::settings::ArithmeticPolicy)).

pub mod cost;
pub mod cutting;
pub mod hydraulics;

pub use cost::{cost_breakdown, cost_per_meter, CostBreakdown};
pub use cutting::{
    base_cutting_speed_mm_s, cut_depth_mm, cutting_speed_mm_min, geometry_correction,
    surface_roughness_um,
};
pub use hydraulics::{
    abrasive_ratio, hydraulic_power_kw, jet_velocity_m_s, kinetic_energy_density,
    mass_flow_rate_kg_s, specific_energy, water_flow_lpm,
};

/// Water density ρ (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// Orifice discharge coefficient
pub const C_DISCHARGE: f64 = 0.65;

/// Orifice velocity coefficient.
///
/// Carried with the calibration set but not applied by any current formula.
pub const C_VELOCITY: f64 = 0.92;

/// Round to `decimals` places, the way `toFixed` and Python's `round` do.
///
/// Rounding works on the exact binary value, so 30.705 (stored as
/// 30.70499...) rounds down. NaN and infinities are returned unchanged.
#[inline]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
