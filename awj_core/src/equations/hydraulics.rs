//! # Hydraulic Formulas
//!
//! Orifice flow through the water nozzle and the quantities derived from it.
//!
//! ## Notation
//!
//! - `d` = Nozzle (orifice) diameter
//! - `P` = Pump pressure
//! - `ρ` = Water density
//! - `C_d` = Discharge coefficient
//! - `Q` = Volume flow
//! - `v` = Jet velocity
//!
//! ## Formulas
//!
//! - A = π(d/2)²
//! - v = C_d·√(2P/ρ)
//! - Q = A·v
//! - N = Q·P

use std::f64::consts::PI;

use super::{round_to, C_DISCHARGE, WATER_DENSITY};
use crate::units::{
    CubicMetersPerSecond, GramsPerSecond, KilogramsPerSecond, Kilowatts, LitersPerMinute,
    MegaPascals, Meters, Millimeters, Pascals, Watts,
};

/// Ideal (Bernoulli) jet velocity √(2P/ρ) in m/s, unrounded.
#[inline]
fn bernoulli_velocity(pressure: Pascals) -> f64 {
    (2.0 * pressure.0 / WATER_DENSITY).sqrt()
}

/// Water flow through the nozzle (l/min), rounded to 2 decimals.
///
/// # Arguments
/// * `nozzle_diameter_mm` - Orifice diameter (mm)
/// * `pressure_mpa` - Pump pressure (MPa)
pub fn water_flow_lpm(nozzle_diameter_mm: f64, pressure_mpa: f64) -> f64 {
    let d: Meters = Millimeters(nozzle_diameter_mm).into();
    let p: Pascals = MegaPascals(pressure_mpa).into();

    let area = PI * (d.0 / 2.0).powi(2);
    let velocity = C_DISCHARGE * bernoulli_velocity(p);

    let flow: LitersPerMinute = CubicMetersPerSecond(area * velocity).into();
    round_to(flow.0, 2)
}

/// Hydraulic power N = Q·P (kW), rounded to 2 decimals.
///
/// # Arguments
/// * `pressure_mpa` - Pump pressure (MPa)
/// * `flow_lpm` - Water flow (l/min), normally the rounded output of [`water_flow_lpm`]
pub fn hydraulic_power_kw(pressure_mpa: f64, flow_lpm: f64) -> f64 {
    let p: Pascals = MegaPascals(pressure_mpa).into();
    let q: CubicMetersPerSecond = LitersPerMinute(flow_lpm).into();

    let power: Kilowatts = Watts(q.0 * p.0).into();
    round_to(power.0, 2)
}

/// Jet velocity from pressure alone (m/s), rounded to 2 decimals.
///
/// This is the ideal velocity; the discharge coefficient is not applied.
pub fn jet_velocity_m_s(pressure_mpa: f64) -> f64 {
    round_to(bernoulli_velocity(MegaPascals(pressure_mpa).into()), 2)
}

/// Specific kinetic energy ½ρv² of the ideal jet (J/m³), rounded to 2 decimals.
///
/// Uses the unrounded velocity, so this equals the pressure in pascals up to
/// floating point error.
pub fn kinetic_energy_density(pressure_mpa: f64) -> f64 {
    let v = bernoulli_velocity(MegaPascals(pressure_mpa).into());
    round_to(0.5 * WATER_DENSITY * v.powi(2), 2)
}

/// Water mass flow through the nozzle, unrounded.
#[inline]
fn water_mass_flow(flow_lpm: f64) -> GramsPerSecond {
    GramsPerSecond(flow_lpm * WATER_DENSITY / 60.0)
}

/// Water mass flow rate (kg/s), rounded to 4 decimals.
pub fn mass_flow_rate_kg_s(flow_lpm: f64) -> f64 {
    let m: KilogramsPerSecond = water_mass_flow(flow_lpm).into();
    round_to(m.0, 4)
}

/// Abrasive to water mass ratio (dimensionless), rounded to 3 decimals.
///
/// Both flows are in g/s.
pub fn abrasive_ratio(abrasive_flow_gs: f64, flow_lpm: f64) -> f64 {
    round_to(abrasive_flow_gs / water_mass_flow(flow_lpm).0, 3)
}

/// Energy spent per unit length of cut, rounded to 2 decimals.
///
/// `power_kw · 1000 / speed_mm_min`, i.e. W per (mm/min).
pub fn specific_energy(power_kw: f64, cutting_speed_mm_min: f64) -> f64 {
    round_to(power_kw * 1000.0 / cutting_speed_mm_min, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_flow_reference() {
        // 0.33 mm nozzle at 300 MPa
        assert_eq!(water_flow_lpm(0.33, 300.0), 2.58);
        assert_eq!(water_flow_lpm(0.33, 400.0), 2.98);
        assert_eq!(water_flow_lpm(0.33, 100.0), 1.49);
    }

    #[test]
    fn test_water_flow_increases_with_pressure() {
        let mut previous = 0.0;
        for pressure in [100.0, 200.0, 300.0, 400.0, 500.0, 600.0] {
            let flow = water_flow_lpm(0.33, pressure);
            assert!(flow > previous, "flow {} at {} MPa", flow, pressure);
            previous = flow;
        }
    }

    #[test]
    fn test_hydraulic_power_reference() {
        // 2.58 l/min at 300 MPa = 43e-6 m³/s * 300e6 Pa = 12.9 kW
        assert_eq!(hydraulic_power_kw(300.0, 2.58), 12.9);
        assert_eq!(hydraulic_power_kw(400.0, 2.98), 19.87);
    }

    #[test]
    fn test_jet_velocity() {
        // √(2 · 300e6 / 1000) = 774.597
        assert_eq!(jet_velocity_m_s(300.0), 774.6);
        assert_eq!(jet_velocity_m_s(100.0), 447.21);
    }

    #[test]
    fn test_kinetic_energy_density_equals_pressure() {
        assert_eq!(kinetic_energy_density(300.0), 300_000_000.0);
        assert_eq!(kinetic_energy_density(400.0), 400_000_000.0);
    }

    #[test]
    fn test_mass_flow_and_abrasive_ratio() {
        assert_eq!(mass_flow_rate_kg_s(2.58), 0.043);
        // 8 g/s abrasive into 43 g/s water
        assert_eq!(abrasive_ratio(8.0, 2.58), 0.186);
        assert_eq!(mass_flow_rate_kg_s(2.98), 0.0497);
        assert_eq!(mass_flow_rate_kg_s(3.45), 0.0575);
    }

    #[test]
    fn test_specific_energy() {
        assert_eq!(specific_energy(12.9, 5000.0), 2.58);
        assert_eq!(specific_energy(2.48, 2.0), 1240.0);
    }

    #[test]
    fn test_zero_flow_gives_infinite_ratio() {
        assert!(abrasive_ratio(8.0, 0.0).is_infinite());
    }
}
