//! # Unit Types
//!
//! Type-safe wrappers for the units the waterjet formulas convert between.
//! They are plain `f64` newtypes, so JSON stays clean (just numbers) and the
//! conversions live in one place instead of being scattered as magic factors.
//!
//! ## Process Units
//!
//! Inputs arrive in shop-floor units and the physics runs in SI:
//! - Length: millimeters (mm) ↔ meters (m)
//! - Pressure: megapascals (MPa) ↔ pascals (Pa)
//! - Volume flow: liters per minute (l/min) ↔ cubic meters per second (m³/s)
//! - Power: kilowatts (kW) ↔ watts (W)
//! - Mass flow: grams per second (g/s) ↔ kilograms per second (kg/s)
//! - Feed rate: millimeters per second ↔ millimeters per minute
//!
//! ## Example
//!
//! ```rust
//! use awj_core::units::{MegaPascals, Pascals, Millimeters, Meters};
//!
//! let p: Pascals = MegaPascals(300.0).into();
//! assert_eq!(p.0, 300.0e6);
//!
//! let d: Meters = Millimeters(0.33).into();
//! assert!((d.0 - 0.00033).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in megapascals (MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Pressure in pascals (Pa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

impl From<MegaPascals> for Pascals {
    fn from(mpa: MegaPascals) -> Self {
        Pascals(mpa.0 * 1e6)
    }
}

impl From<Pascals> for MegaPascals {
    fn from(pa: Pascals) -> Self {
        MegaPascals(pa.0 / 1e6)
    }
}

// ============================================================================
// Volume Flow Units
// ============================================================================

/// Volume flow in liters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerMinute(pub f64);

/// Volume flow in cubic meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<CubicMetersPerSecond> for LitersPerMinute {
    fn from(q: CubicMetersPerSecond) -> Self {
        // m³ -> l, then s -> min
        LitersPerMinute(q.0 * 1000.0 * 60.0)
    }
}

impl From<LitersPerMinute> for CubicMetersPerSecond {
    fn from(q: LitersPerMinute) -> Self {
        CubicMetersPerSecond(q.0 / (1000.0 * 60.0))
    }
}

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

// ============================================================================
// Mass Flow Units
// ============================================================================

/// Mass flow in grams per second (abrasive feed)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GramsPerSecond(pub f64);

/// Mass flow in kilograms per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilogramsPerSecond(pub f64);

impl From<GramsPerSecond> for KilogramsPerSecond {
    fn from(g: GramsPerSecond) -> Self {
        KilogramsPerSecond(g.0 / 1000.0)
    }
}

impl From<KilogramsPerSecond> for GramsPerSecond {
    fn from(kg: KilogramsPerSecond) -> Self {
        GramsPerSecond(kg.0 * 1000.0)
    }
}

// ============================================================================
// Feed Rate Units
// ============================================================================

/// Traverse speed in millimeters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmPerSecond(pub f64);

/// Traverse speed in millimeters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmPerMinute(pub f64);

impl From<MmPerSecond> for MmPerMinute {
    fn from(v: MmPerSecond) -> Self {
        MmPerMinute(v.0 * 60.0)
    }
}

impl From<MmPerMinute> for MmPerSecond {
    fn from(v: MmPerMinute) -> Self {
        MmPerSecond(v.0 / 60.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(Pascals);
impl_arithmetic!(LitersPerMinute);
impl_arithmetic!(CubicMetersPerSecond);
impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(GramsPerSecond);
impl_arithmetic!(KilogramsPerSecond);
impl_arithmetic!(MmPerSecond);
impl_arithmetic!(MmPerMinute);

// ============================================================================
// JSON Representation of Non-Finite Values
// ============================================================================

/// Serde adapter for `f64` fields that may hold NaN or an infinity.
///
/// JSON has no literal for these and serde_json writes them as `null`, which
/// then fails to read back into an `f64`. With this adapter finite values stay
/// plain numbers and non-finite values are written as the strings `"NaN"`,
/// `"inf"` and `"-inf"`. Reading accepts numbers, those strings, and `null`
/// (read as NaN).
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Sample {
///     #[serde(with = "awj_core::units::non_finite")]
///     ratio: f64,
/// }
///
/// let json = serde_json::to_string(&Sample { ratio: f64::INFINITY }).unwrap();
/// assert_eq!(json, r#"{"ratio":"inf"}"#);
/// let back: Sample = serde_json::from_str(&json).unwrap();
/// assert_eq!(back.ratio, f64::INFINITY);
/// ```
pub mod non_finite {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            // Display gives "NaN", "inf" and "-inf"
            serializer.collect_str(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Number(v)) => Ok(v),
            Some(Repr::Text(s)) => match s.parse::<f64>() {
                Ok(v) if !v.is_finite() => Ok(v),
                _ => Err(de::Error::custom(format!("expected a number, \"NaN\", \"inf\" or \"-inf\", got \"{}\"", s))),
            },
            None => Ok(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpa_to_pa() {
        let p: Pascals = MegaPascals(300.0).into();
        assert_eq!(p.0, 300_000_000.0);
    }

    #[test]
    fn test_flow_conversion() {
        let q: CubicMetersPerSecond = LitersPerMinute(60_000.0).into();
        assert_eq!(q.0, 1.0);

        let back: LitersPerMinute = q.into();
        assert_eq!(back.0, 60_000.0);
    }

    #[test]
    fn test_feed_rate_conversion() {
        let v: MmPerMinute = MmPerSecond(2.5).into();
        assert_eq!(v.0, 150.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilowatts(10.0);
        let b = Kilowatts(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let d = Millimeters(0.33);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "0.33");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(d, roundtrip);
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Reading {
        #[serde(with = "non_finite")]
        value: f64,
    }

    fn reading_json(value: f64) -> String {
        serde_json::to_string(&Reading { value }).unwrap()
    }

    fn read(json: &str) -> Result<f64, serde_json::Error> {
        serde_json::from_str::<Reading>(json).map(|r| r.value)
    }

    #[test]
    fn test_non_finite_written_as_strings() {
        assert_eq!(reading_json(2.58), r#"{"value":2.58}"#);
        assert_eq!(reading_json(f64::INFINITY), r#"{"value":"inf"}"#);
        assert_eq!(reading_json(f64::NEG_INFINITY), r#"{"value":"-inf"}"#);
        assert_eq!(reading_json(f64::NAN), r#"{"value":"NaN"}"#);
    }

    #[test]
    fn test_non_finite_read_back() {
        assert_eq!(read(r#"{"value":2.58}"#).unwrap(), 2.58);
        assert_eq!(read(r#"{"value":3}"#).unwrap(), 3.0);
        assert_eq!(read(r#"{"value":"inf"}"#).unwrap(), f64::INFINITY);
        assert_eq!(read(r#"{"value":"-inf"}"#).unwrap(), f64::NEG_INFINITY);
        assert!(read(r#"{"value":"NaN"}"#).unwrap().is_nan());
        assert!(read(r#"{"value":null}"#).unwrap().is_nan());
    }

    #[test]
    fn test_non_finite_rejects_other_text() {
        assert!(read(r#"{"value":"2.58"}"#).is_err());
        assert!(read(r#"{"value":"fast"}"#).is_err());
    }
}
