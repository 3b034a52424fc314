//! # Calculation Records
//!
//! A [`CalculationRecord`] is one finished calculation with identity and
//! timing metadata attached. It serializes to a single flat JSON object, the
//! input fields and result fields side by side, which is the shape a caller
//! submits to a history store or a remote service:
//!
//! ```text
//! CalculationRecord
//! ├── id: Uuid
//! ├── created: DateTime<Utc>
//! ├── calculation_time_ms: f64
//! ├── ...AwjInput fields (flattened)
//! └── ...AwjResult fields (flattened, `extended` stays nested)
//! ```
//!
//! Storing or sending the record is up to the caller; this module does no I/O.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::calculations::AwjInput;
//! use awj_core::record::CalculationRecord;
//! use awj_core::settings::CalculatorSettings;
//!
//! let input = AwjInput::new("steel", 10.0, 300.0);
//! let record = CalculationRecord::compute(input, &CalculatorSettings::default()).unwrap();
//!
//! let json = serde_json::to_value(&record).unwrap();
//! assert_eq!(json["thickness_mm"], 10.0);
//! assert_eq!(json["water_flow_lpm"], 2.58);
//! ```

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::awj::{calculate, AwjInput, AwjResult};
use crate::equations::round_to;
use crate::errors::CalcResult;
use crate::settings::CalculatorSettings;

/// One calculation with its inputs, results and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique record identifier
    pub id: Uuid,

    /// When the calculation ran (UTC)
    pub created: DateTime<Utc>,

    /// Wall time spent in validation and the pipeline (ms, 2 decimals)
    pub calculation_time_ms: f64,

    #[serde(flatten)]
    pub input: AwjInput,

    #[serde(flatten)]
    pub result: AwjResult,
}

impl CalculationRecord {
    /// Validate and calculate `input`, timing the call.
    ///
    /// Fails exactly when [`calculate`] fails.
    pub fn compute(input: AwjInput, settings: &CalculatorSettings) -> CalcResult<Self> {
        let created = Utc::now();
        let start = Instant::now();
        let result = calculate(&input, settings)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(CalculationRecord {
            id: Uuid::new_v4(),
            created,
            calculation_time_ms: round_to(elapsed_ms, 2),
            input,
            result,
        })
    }

    /// Wrap an already computed result, e.g. one from a batch.
    pub fn from_parts(input: AwjInput, result: AwjResult) -> Self {
        CalculationRecord {
            id: Uuid::new_v4(),
            created: Utc::now(),
            calculation_time_ms: 0.0,
            input,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::awj::perform_full_calculation;

    #[test]
    fn test_compute_reference() {
        let input = AwjInput::new("steel", 10.0, 300.0);
        let record = CalculationRecord::compute(input.clone(), &CalculatorSettings::default()).unwrap();

        assert_eq!(record.input, input);
        assert_eq!(record.result, perform_full_calculation(&input));
        assert!(record.calculation_time_ms >= 0.0);
    }

    #[test]
    fn test_compute_propagates_validation_error() {
        let input = AwjInput::new("steel", 0.0, 300.0);
        let err = CalculationRecord::compute(input, &CalculatorSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_ids_are_unique() {
        let input = AwjInput::new("glass", 5.0, 300.0);
        let a = CalculationRecord::compute(input.clone(), &CalculatorSettings::default()).unwrap();
        let b = CalculationRecord::compute(input, &CalculatorSettings::default()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_flat_json_shape() {
        let input = AwjInput::new("aluminum", 5.0, 400.0).with_abrasive_flow(10.0);
        let result = perform_full_calculation(&input);
        let record = CalculationRecord::from_parts(input, result);

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "id",
            "created",
            "calculation_time_ms",
            "material",
            "pressure_mpa",
            "mesh_size",
            "cutting_speed_mm_min",
            "cost_per_meter",
            "extended",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(json["material"], "aluminum");
        assert_eq!(json["cost_per_meter"], 3.32);
        assert_eq!(json["extended"]["abrasive_ratio"], 0.201);
    }

    #[test]
    fn test_json_roundtrip() {
        let input = AwjInput::new("composite", 15.0, 350.0);
        let record = CalculationRecord::compute(input, &CalculatorSettings::default()).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let roundtrip: CalculationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, record);
    }

    #[test]
    fn test_json_roundtrip_with_infinite_field() {
        let input = AwjInput::new("steel", 10.0, 300.0).with_nozzle_diameter(0.0);
        let record = CalculationRecord::compute(input, &CalculatorSettings::default()).unwrap();
        assert!(record.result.extended.abrasive_ratio.is_infinite());

        let json = serde_json::to_string(&record).unwrap();
        let roundtrip: CalculationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, record);
    }
}
