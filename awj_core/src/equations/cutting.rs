//! # Empirical Cutting Models
//!
//! Regression models for traverse speed, depth of cut and surface finish.
//! The exponents and normalization factors are calibrated constants; they are
//! reproduced exactly and must not be re-derived.
//!
//! ## Notation
//!
//! - `k` = Material cutting efficiency coefficient
//! - `σ` = Material strength
//! - `P` = Pump pressure (MPa)
//! - `ṁa` = Abrasive flow (g/s)
//! - `t` = Material thickness (mm)
//! - `v` = Traverse speed (mm/min)
//!
//! ## Formulas
//!
//! - v = 60 · k·P^1.5·ṁa^0.8 / (t^1.2·σ^0.5) · (1 + 0.1·(d_f/d_n − 3))
//! - h = 10 · k·P^1.5·ṁa^0.8 / v^0.5
//! - Ra = 2 · R·v^0.3 / (ṁa^0.4·mesh^0.2)

use super::round_to;
use crate::materials::MaterialProperties;
use crate::units::{MmPerMinute, MmPerSecond};

/// Pressure exponent
pub const PRESSURE_EXPONENT: f64 = 1.5;
/// Abrasive flow exponent
pub const ABRASIVE_EXPONENT: f64 = 0.8;
/// Thickness exponent
pub const THICKNESS_EXPONENT: f64 = 1.2;
/// Material strength exponent
pub const STRENGTH_EXPONENT: f64 = 0.5;

/// Focus/nozzle diameter ratio at which the geometry correction is neutral
pub const OPTIMAL_DIAMETER_RATIO: f64 = 3.0;
/// Correction per unit of diameter ratio deviation
pub const DIAMETER_RATIO_SENSITIVITY: f64 = 0.1;

/// Cutting speed bounds (mm/min)
pub const MIN_CUTTING_SPEED_MM_MIN: f64 = 2.0;
pub const MAX_CUTTING_SPEED_MM_MIN: f64 = 5000.0;

/// Depth model normalization factor
pub const DEPTH_NORMALIZATION: f64 = 10.0;

/// Roughness model normalization factor
pub const ROUGHNESS_NORMALIZATION: f64 = 2.0;
/// Roughness bounds (µm Ra)
pub const MIN_ROUGHNESS_UM: f64 = 0.5;
pub const MAX_ROUGHNESS_UM: f64 = 20.0;

/// Mesh size assumed when none is given
pub const DEFAULT_MESH_SIZE: f64 = 80.0;

/// Erosion term k·P^1.5·ṁa^0.8 shared by the speed and depth models.
#[inline]
fn erosion_term(material: &MaterialProperties, pressure_mpa: f64, abrasive_flow_gs: f64) -> f64 {
    material.k * pressure_mpa.powf(PRESSURE_EXPONENT) * abrasive_flow_gs.powf(ABRASIVE_EXPONENT)
}

/// Uncorrected, unclamped regression speed (mm/s).
///
/// `k·P^1.5·ṁa^0.8 / (t^1.2·σ^0.5)`
pub fn base_cutting_speed_mm_s(
    material: &MaterialProperties,
    thickness_mm: f64,
    pressure_mpa: f64,
    abrasive_flow_gs: f64,
) -> f64 {
    let numerator = erosion_term(material, pressure_mpa, abrasive_flow_gs);
    let denominator =
        thickness_mm.powf(THICKNESS_EXPONENT) * material.strength.powf(STRENGTH_EXPONENT);
    numerator / denominator
}

/// Multiplicative correction for focus tube / nozzle geometry.
///
/// Neutral (1.0) at a diameter ratio of 3, linear in the deviation from it.
#[inline]
pub fn geometry_correction(nozzle_diameter_mm: f64, focus_diameter_mm: f64) -> f64 {
    let diameter_ratio = focus_diameter_mm / nozzle_diameter_mm;
    1.0 + DIAMETER_RATIO_SENSITIVITY * (diameter_ratio - OPTIMAL_DIAMETER_RATIO)
}

/// Traverse speed (mm/min), clamped to [2, 5000] and rounded to 1 decimal.
///
/// Infinite speeds saturate at the bounds; NaN passes through.
pub fn cutting_speed_mm_min(
    material: &MaterialProperties,
    thickness_mm: f64,
    pressure_mpa: f64,
    abrasive_flow_gs: f64,
    nozzle_diameter_mm: f64,
    focus_diameter_mm: f64,
) -> f64 {
    let mut speed = MmPerSecond(base_cutting_speed_mm_s(
        material,
        thickness_mm,
        pressure_mpa,
        abrasive_flow_gs,
    ));
    speed = speed * geometry_correction(nozzle_diameter_mm, focus_diameter_mm);

    let speed: MmPerMinute = speed.into();
    round_to(speed.0.clamp(MIN_CUTTING_SPEED_MM_MIN, MAX_CUTTING_SPEED_MM_MIN), 1)
}

/// Maximum depth of cut (mm), rounded to 2 decimals.
///
/// Consumes the (rounded, clamped) cutting speed, so it must run after
/// [`cutting_speed_mm_min`].
pub fn cut_depth_mm(
    material: &MaterialProperties,
    pressure_mpa: f64,
    abrasive_flow_gs: f64,
    cutting_speed_mm_min: f64,
) -> f64 {
    let depth = erosion_term(material, pressure_mpa, abrasive_flow_gs)
        / cutting_speed_mm_min.powf(0.5);
    round_to(depth * DEPTH_NORMALIZATION, 2)
}

/// Arithmetic mean roughness Ra (µm), clamped to [0.5, 20] and rounded to 2 decimals.
pub fn surface_roughness_um(
    material: &MaterialProperties,
    cutting_speed_mm_min: f64,
    abrasive_flow_gs: f64,
    mesh_size: f64,
) -> f64 {
    let base = material.roughness_factor * cutting_speed_mm_min.powf(0.3)
        / (abrasive_flow_gs.powf(0.4) * mesh_size.powf(0.2));
    let roughness = base * ROUGHNESS_NORMALIZATION;
    round_to(roughness.clamp(MIN_ROUGHNESS_UM, MAX_ROUGHNESS_UM), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialType;

    const STEEL: MaterialProperties = MaterialType::Steel.properties();

    #[test]
    fn test_geometry_correction_neutral_at_ratio_3() {
        assert_eq!(geometry_correction(0.3, 0.9), 1.0 + 0.1 * (0.9 / 0.3 - 3.0));
        assert!((geometry_correction(0.5, 1.5) - 1.0).abs() < 1e-12);
        // 1.0 / 0.33 = 3.0303 → 1.00303
        assert!((geometry_correction(0.33, 1.0) - 1.00303).abs() < 1e-5);
        // Ratio 2 → 0.9
        assert!((geometry_correction(0.5, 1.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_cutting_speed_reference() {
        assert_eq!(cutting_speed_mm_min(&STEEL, 20.0, 300.0, 8.0, 0.33, 1.0), 2266.5);
        assert_eq!(cutting_speed_mm_min(&STEEL, 100.0, 300.0, 8.0, 0.33, 1.0), 328.5);
        assert_eq!(cutting_speed_mm_min(&STEEL, 200.0, 300.0, 8.0, 0.33, 1.0), 143.0);

        let granite = MaterialType::Granite.properties();
        assert_eq!(cutting_speed_mm_min(&granite, 30.0, 380.0, 8.0, 0.33, 1.0), 1621.8);
    }

    #[test]
    fn test_cutting_speed_clamps() {
        // Thin steel saturates the upper bound
        assert_eq!(cutting_speed_mm_min(&STEEL, 10.0, 300.0, 8.0, 0.33, 1.0), 5000.0);

        // Thick titanium at low pressure hits the floor
        let titanium = MaterialType::Titanium.properties();
        assert_eq!(cutting_speed_mm_min(&titanium, 500.0, 100.0, 1.0, 0.33, 1.0), 2.0);
    }

    #[test]
    fn test_base_speed_decreases_with_thickness() {
        let mut previous = f64::INFINITY;
        for thickness in [0.5, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0] {
            let speed = base_cutting_speed_mm_s(&STEEL, thickness, 300.0, 8.0);
            assert!(speed < previous, "speed {} at {} mm", speed, thickness);
            previous = speed;
        }
    }

    #[test]
    fn test_cut_depth_reference() {
        assert_eq!(cut_depth_mm(&STEEL, 300.0, 8.0, 5000.0), 3878.55);
        assert_eq!(cut_depth_mm(&STEEL, 300.0, 8.0, 2266.5), 5760.71);
    }

    #[test]
    fn test_cut_depth_zero_speed_is_infinite() {
        assert_eq!(cut_depth_mm(&STEEL, 300.0, 8.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_surface_roughness_reference() {
        assert_eq!(surface_roughness_um(&STEEL, 5000.0, 8.0, DEFAULT_MESH_SIZE), 4.67);
        assert_eq!(surface_roughness_um(&STEEL, 2266.5, 8.0, DEFAULT_MESH_SIZE), 3.68);

        let granite = MaterialType::Granite.properties();
        assert_eq!(surface_roughness_um(&granite, 1621.8, 8.0, 120.0), 6.14);
    }

    #[test]
    fn test_surface_roughness_clamps() {
        // Very fine finish is floored at 0.5
        let glass = MaterialType::Glass.properties();
        assert_eq!(surface_roughness_um(&glass, 2.0, 20.0, 120.0), 0.5);

        // Zero mesh divides by zero and saturates at 20
        assert_eq!(surface_roughness_um(&STEEL, 5000.0, 8.0, 0.0), 20.0);
    }

    #[test]
    fn test_negative_mesh_propagates_nan() {
        assert!(surface_roughness_um(&STEEL, 5000.0, 8.0, -80.0).is_nan());
    }
}
