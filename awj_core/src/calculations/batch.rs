//! # Batch Comparison
//!
//! Runs one base parameter set plus a list of variations, so parameter
//! choices can be compared side by side. Each variation only names the fields
//! it changes; everything else is taken from the base.
//!
//! Only the base is validated. Variants are computed with the plain pipeline,
//! so a variation that leaves the accepted ranges still yields a result
//! (possibly with non-finite fields) instead of failing the whole batch.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "base_parameters": { "material": "steel", "thickness_mm": 20.0, "pressure_mpa": 300.0 },
//!   "variations": [
//!     { "pressure_mpa": 400.0 },
//!     { "abrasive_flow_gs": 12.0, "mesh_size": 120.0 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::awj::{perform_full_calculation_with_rates, AwjInput, AwjResult};
use super::validation::validate;
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalculatorSettings;

/// Maximum number of variations in one request
pub const MAX_VARIATIONS: usize = 50;

/// Label of the unmodified base variant
pub const BASE_LABEL: &str = "base";

/// Fields to change relative to the base parameters. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_mpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nozzle_diameter_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_diameter_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_length_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abrasive_flow_gs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_size: Option<f64>,
}

impl InputOverrides {
    /// Merge these overrides over `base`, returning a new input.
    pub fn apply(&self, base: &AwjInput) -> AwjInput {
        AwjInput {
            material: self.material.clone().unwrap_or_else(|| base.material.clone()),
            thickness_mm: self.thickness_mm.unwrap_or(base.thickness_mm),
            pressure_mpa: self.pressure_mpa.unwrap_or(base.pressure_mpa),
            nozzle_diameter_mm: self.nozzle_diameter_mm.unwrap_or(base.nozzle_diameter_mm),
            focus_diameter_mm: self.focus_diameter_mm.unwrap_or(base.focus_diameter_mm),
            focus_length_mm: self.focus_length_mm.unwrap_or(base.focus_length_mm),
            abrasive_flow_gs: self.abrasive_flow_gs.unwrap_or(base.abrasive_flow_gs),
            mesh_size: self.mesh_size.unwrap_or(base.mesh_size),
        }
    }

    /// True when no field is overridden
    pub fn is_empty(&self) -> bool {
        *self == InputOverrides::default()
    }
}

/// Base parameters plus variations to compare against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub base_parameters: AwjInput,
    pub variations: Vec<InputOverrides>,
}

/// One computed variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVariant {
    /// "base", "variation_1", "variation_2", ...
    pub variant: String,
    /// Effective parameters after merging
    pub parameters: AwjInput,
    pub results: AwjResult,
}

/// All variants of a batch, base first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Number of entries in `results` (variations + 1)
    pub total_variants: usize,
    pub results: Vec<BatchVariant>,
}

impl BatchResult {
    /// Look up a variant by label
    pub fn get(&self, label: &str) -> Option<&BatchVariant> {
        self.results.iter().find(|v| v.variant == label)
    }

    /// Variant with the highest cutting speed (first one wins ties)
    pub fn fastest(&self) -> Option<&BatchVariant> {
        self.results.iter().reduce(|best, v| {
            if v.results.cutting_speed_mm_min > best.results.cutting_speed_mm_min {
                v
            } else {
                best
            }
        })
    }

    /// Variant with the lowest cost per meter (first one wins ties)
    pub fn cheapest(&self) -> Option<&BatchVariant> {
        self.results.iter().reduce(|best, v| {
            if v.results.cost_per_meter < best.results.cost_per_meter {
                v
            } else {
                best
            }
        })
    }
}

/// Label of the n-th variation (1-based)
pub fn variation_label(n: usize) -> String {
    format!("variation_{}", n)
}

/// Compute the base and every variation.
///
/// # Errors
///
/// * `CalcError::InvalidBatch` - no variations, or more than [`MAX_VARIATIONS`]
/// * `CalcError::ValidationFailed` - the base parameters are out of range
pub fn run_batch(request: &BatchRequest, settings: &CalculatorSettings) -> CalcResult<BatchResult> {
    if request.variations.is_empty() {
        return Err(CalcError::invalid_batch("at least one variation is required"));
    }
    if request.variations.len() > MAX_VARIATIONS {
        return Err(CalcError::invalid_batch(format!(
            "{} variations given, at most {} allowed",
            request.variations.len(),
            MAX_VARIATIONS
        )));
    }

    validate(&request.base_parameters).into_result()?;

    let rates = &settings.cost_rates;
    let base = &request.base_parameters;

    let mut results = Vec::with_capacity(request.variations.len() + 1);
    results.push(BatchVariant {
        variant: BASE_LABEL.to_string(),
        parameters: base.clone(),
        results: perform_full_calculation_with_rates(base, rates),
    });

    for (i, overrides) in request.variations.iter().enumerate() {
        let parameters = overrides.apply(base);
        let variant_results = perform_full_calculation_with_rates(&parameters, rates);
        results.push(BatchVariant {
            variant: variation_label(i + 1),
            parameters,
            results: variant_results,
        });
    }

    debug!(total_variants = results.len(), "batch calculation");

    Ok(BatchResult {
        total_variants: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AwjInput {
        AwjInput::new("steel", 20.0, 300.0)
    }

    fn request(variations: Vec<InputOverrides>) -> BatchRequest {
        BatchRequest {
            base_parameters: base(),
            variations,
        }
    }

    #[test]
    fn test_overrides_merge() {
        let overrides = InputOverrides {
            pressure_mpa: Some(400.0),
            material: Some("aluminum".to_string()),
            ..Default::default()
        };
        let merged = overrides.apply(&base());
        assert_eq!(merged.pressure_mpa, 400.0);
        assert_eq!(merged.material, "aluminum");
        assert_eq!(merged.thickness_mm, 20.0);
        assert_eq!(merged.abrasive_flow_gs, 8.0);

        assert!(InputOverrides::default().is_empty());
        assert_eq!(InputOverrides::default().apply(&base()), base());
    }

    #[test]
    fn test_labels_and_count() {
        let result = run_batch(
            &request(vec![
                InputOverrides {
                    pressure_mpa: Some(400.0),
                    ..Default::default()
                },
                InputOverrides {
                    thickness_mm: Some(50.0),
                    ..Default::default()
                },
            ]),
            &CalculatorSettings::default(),
        )
        .unwrap();

        assert_eq!(result.total_variants, 3);
        let labels: Vec<_> = result.results.iter().map(|v| v.variant.as_str()).collect();
        assert_eq!(labels, vec!["base", "variation_1", "variation_2"]);

        let base_variant = result.get("base").unwrap();
        assert_eq!(base_variant.results.cutting_speed_mm_min, 2266.5);
        assert_eq!(result.get("variation_2").unwrap().parameters.thickness_mm, 50.0);
    }

    #[test]
    fn test_variants_match_single_calculations() {
        let overrides = InputOverrides {
            abrasive_flow_gs: Some(12.0),
            mesh_size: Some(120.0),
            ..Default::default()
        };
        let result = run_batch(&request(vec![overrides.clone()]), &CalculatorSettings::default()).unwrap();

        let expected = perform_full_calculation_with_rates(&overrides.apply(&base()), &Default::default());
        assert_eq!(result.results[1].results, expected);
    }

    #[test]
    fn test_fastest_and_cheapest() {
        let result = run_batch(
            &request(vec![
                InputOverrides {
                    thickness_mm: Some(100.0),
                    ..Default::default()
                },
                InputOverrides {
                    thickness_mm: Some(12.0),
                    ..Default::default()
                },
            ]),
            &CalculatorSettings::default(),
        )
        .unwrap();

        assert_eq!(result.fastest().unwrap().variant, "variation_2");
        assert_eq!(result.cheapest().unwrap().variant, "variation_2");
    }

    #[test]
    fn test_requires_variations() {
        let err = run_batch(&request(vec![]), &CalculatorSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BATCH");
    }

    #[test]
    fn test_variation_limit() {
        let at_limit = request(vec![InputOverrides::default(); MAX_VARIATIONS]);
        let result = run_batch(&at_limit, &CalculatorSettings::default()).unwrap();
        assert_eq!(result.total_variants, MAX_VARIATIONS + 1);
        assert_eq!(result.results.last().unwrap().variant, "variation_50");

        let over = request(vec![InputOverrides::default(); MAX_VARIATIONS + 1]);
        let err = run_batch(&over, &CalculatorSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BATCH");
    }

    #[test]
    fn test_invalid_base_rejected() {
        let bad = BatchRequest {
            base_parameters: base().with_pressure(700.0),
            variations: vec![InputOverrides::default()],
        };
        let err = run_batch(&bad, &CalculatorSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_out_of_range_variation_still_computed() {
        let result = run_batch(
            &request(vec![InputOverrides {
                pressure_mpa: Some(800.0),
                ..Default::default()
            }]),
            &CalculatorSettings::default(),
        )
        .unwrap();
        assert_eq!(result.results[1].parameters.pressure_mpa, 800.0);
        assert!(result.results[1].results.is_finite());
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "base_parameters": {"material": "granite", "thickness_mm": 30.0, "pressure_mpa": 380.0},
            "variations": [{"mesh_size": 120.0}]
        }"#;
        let request: BatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.variations[0].mesh_size, Some(120.0));
        assert_eq!(request.variations[0].pressure_mpa, None);

        let result = run_batch(&request, &CalculatorSettings::default()).unwrap();
        assert_eq!(result.results[1].results.surface_roughness_um, 6.14);
    }

    #[test]
    fn test_unknown_override_field_rejected() {
        let json = r#"{"presure_mpa": 400.0}"#;
        assert!(serde_json::from_str::<InputOverrides>(json).is_err());
    }
}
