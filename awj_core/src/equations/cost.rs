//! # Cost per Meter
//!
//! Consumable cost of one meter of cut: abrasive, water and electrical energy,
//! each billed for the time the head needs to travel 1000 mm.
//!
//! ## Formulas
//!
//! - t = 1000 / v                      (min per meter)
//! - m_abr = ṁa/1000 · t · 60          (kg)
//! - V_w = Q/1000 · t                  (m³)
//! - E = N/60 · t                      (kWh)
//! - cost = m_abr·c_abr + V_w·c_w + E·c_e
//!
//! The three components are independent; the total is their plain sum.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::settings::CostRates;
use crate::units::{GramsPerSecond, KilogramsPerSecond};

/// The three components of the cost per meter, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Abrasive cost per meter
    pub abrasive: f64,
    /// Water cost per meter
    pub water: f64,
    /// Energy cost per meter
    pub energy: f64,
}

impl CostBreakdown {
    /// Sum of the components, unrounded
    pub fn total(&self) -> f64 {
        self.abrasive + self.water + self.energy
    }
}

/// Itemized cost of one meter of cut.
///
/// # Arguments
/// * `abrasive_flow_gs` - Abrasive flow (g/s)
/// * `cutting_speed_mm_min` - Traverse speed (mm/min)
/// * `water_flow_lpm` - Water flow (l/min)
/// * `hydraulic_power_kw` - Hydraulic power (kW)
/// * `rates` - Unit prices
pub fn cost_breakdown(
    abrasive_flow_gs: f64,
    cutting_speed_mm_min: f64,
    water_flow_lpm: f64,
    hydraulic_power_kw: f64,
    rates: &CostRates,
) -> CostBreakdown {
    let time_per_meter_min = 1000.0 / cutting_speed_mm_min;

    let abrasive: KilogramsPerSecond = GramsPerSecond(abrasive_flow_gs).into();
    let abrasive_kg = abrasive.0 * time_per_meter_min * 60.0;
    let water_m3 = (water_flow_lpm / 1000.0) * time_per_meter_min;
    let energy_kwh = (hydraulic_power_kw / 60.0) * time_per_meter_min;

    CostBreakdown {
        abrasive: abrasive_kg * rates.abrasive_cost_per_kg,
        water: water_m3 * rates.water_cost_per_m3,
        energy: energy_kwh * rates.power_cost_per_kwh,
    }
}

/// Total cost of one meter of cut, rounded to 2 decimals.
pub fn cost_per_meter(
    abrasive_flow_gs: f64,
    cutting_speed_mm_min: f64,
    water_flow_lpm: f64,
    hydraulic_power_kw: f64,
    rates: &CostRates,
) -> f64 {
    let breakdown = cost_breakdown(
        abrasive_flow_gs,
        cutting_speed_mm_min,
        water_flow_lpm,
        hydraulic_power_kw,
        rates,
    );
    round_to(breakdown.total(), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_cost() {
        let rates = CostRates::default();
        assert_eq!(cost_per_meter(8.0, 5000.0, 2.58, 12.9, &rates), 2.62);
        assert_eq!(cost_per_meter(8.0, 2266.5, 2.58, 12.9, &rates), 5.79);
        assert_eq!(cost_per_meter(1.0, 2.0, 1.49, 2.48, &rates), 907.17);
    }

    #[test]
    fn test_components() {
        // 0.2 min per meter at 5000 mm/min
        let b = cost_breakdown(8.0, 5000.0, 2.58, 12.9, &CostRates::default());
        // 8 g/s · 12 s = 96 g → 0.096 kg · 25
        assert!(approx_eq(b.abrasive, 2.4), "abrasive = {}", b.abrasive);
        // 2.58 l/min · 0.2 min = 0.516 l → 0.000516 m³ · 100
        assert!(approx_eq(b.water, 0.0516), "water = {}", b.water);
        // 12.9 kW · 0.2 min = 0.043 kWh · 4
        assert!(approx_eq(b.energy, 0.172), "energy = {}", b.energy);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let rates = CostRates::default();
        let b = cost_breakdown(8.0, 2266.5, 2.58, 12.9, &rates);
        let total = cost_per_meter(8.0, 2266.5, 2.58, 12.9, &rates);
        assert_eq!(total, round_to(b.abrasive + b.water + b.energy, 2));
    }

    #[test]
    fn test_custom_rates() {
        let rates = CostRates {
            abrasive_cost_per_kg: 0.0,
            water_cost_per_m3: 0.0,
            power_cost_per_kwh: 10.0,
        };
        let b = cost_breakdown(8.0, 5000.0, 2.58, 12.9, &rates);
        assert_eq!(b.abrasive, 0.0);
        assert_eq!(b.water, 0.0);
        assert!(approx_eq(b.energy, 0.43));
    }

    #[test]
    fn test_zero_speed_is_infinite() {
        let total = cost_per_meter(8.0, 0.0, 2.58, 12.9, &CostRates::default());
        assert_eq!(total, f64::INFINITY);
    }
}
