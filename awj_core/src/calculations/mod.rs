//! # AWJ Calculations
//!
//! The calculation engine and everything that feeds it. The pattern follows
//! the rest of the crate:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> Result<*Result, CalcError>` - Validated entry point
//!
//! ## Modules
//!
//! - [`awj`] - Input/result records and the six stage pipeline
//! - [`validation`] - Parameter range checks and non-blocking advisories
//! - [`batch`] - Base parameters plus variations, computed side by side

pub mod awj;
pub mod batch;
pub mod validation;

// Re-export commonly used types
pub use awj::{
    calculate, perform_full_calculation, perform_full_calculation_with_rates, AwjInput, AwjResult,
    ExtendedResults,
};
pub use batch::{run_batch, BatchRequest, BatchResult, BatchVariant, InputOverrides};
pub use validation::{advisories, validate, ValidationReport, Violation};
