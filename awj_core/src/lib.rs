//! # awj_core - Abrasive Waterjet Calculation Engine
//!
//! `awj_core` turns a set of abrasive waterjet (AWJ) process parameters into
//! the derived cutting quantities: water flow, hydraulic power, cutting speed,
//! cut depth, surface roughness, cost per meter and a handful of jet metrics.
//! All inputs and outputs are JSON-serializable, so a form, a CLI or a remote
//! service can call it with a plain record and render whatever comes back.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **No I/O in the engine**: Settings files are the only thing read from disk
//!
//! ## Quick Start
//!
//! ```rust
//! use awj_core::calculations::{calculate, validate, AwjInput};
//! use awj_core::settings::CalculatorSettings;
//!
//! let input = AwjInput::new("steel", 10.0, 300.0);
//! assert!(validate(&input).is_valid());
//!
//! let result = calculate(&input, &CalculatorSettings::default()).unwrap();
//! assert_eq!(result.water_flow_lpm, 2.58);
//! assert_eq!(result.cutting_speed_mm_min, 5000.0);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("cost_per_meter"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Input/result records, validation, the pipeline and batches
//! - [`equations`] - The individual formula stages
//! - [`materials`] - Material table and abrasive grit catalog
//! - [`settings`] - Cost rates and arithmetic policy
//! - [`record`] - Calculation records with id and timing metadata
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod record;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, perform_full_calculation, validate, AwjInput, AwjResult};
pub use errors::{CalcError, CalcResult};
pub use materials::{lookup_material, MaterialProperties, MaterialType};
pub use record::CalculationRecord;
pub use settings::{ArithmeticPolicy, CalculatorSettings, CostRates};
