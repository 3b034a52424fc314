//! # Materials Database
//!
//! Cutting properties for the workpiece materials the calculator supports,
//! plus the abrasive grit catalog.
//!
//! The table is read-only, process-wide data: it is built once on first use
//! and never mutated. There is no behavior that differs between materials,
//! only data, so materials are an enum with a property lookup rather than
//! a trait hierarchy.
//!
//! ## Lookup Policy
//!
//! The engine is lenient: [`lookup_material`] resolves any key it does not
//! recognize to steel. Callers that want to reject typos (form parsers, the
//! CLI) use the strict [`MaterialType::from_key`] instead.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::materials::{lookup_material, MaterialType};
//!
//! let aluminum = MaterialType::Aluminum.properties();
//! assert_eq!(aluminum.k, 1.3);
//!
//! // Unknown keys fall back to steel
//! assert_eq!(lookup_material("unobtainium"), MaterialType::Steel.properties());
//! ```

pub mod abrasives;

pub use abrasives::MeshSize;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Workpiece materials with calibrated cutting coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    #[default]
    Steel,
    Aluminum,
    Titanium,
    Granite,
    Glass,
    Ceramic,
    Composite,
}

impl MaterialType {
    /// All material variants for UI selection
    pub const ALL: [MaterialType; 7] = [
        MaterialType::Steel,
        MaterialType::Aluminum,
        MaterialType::Titanium,
        MaterialType::Granite,
        MaterialType::Glass,
        MaterialType::Ceramic,
        MaterialType::Composite,
    ];

    /// Identifier used in input records (e.g., "steel")
    pub fn key(&self) -> &'static str {
        match self {
            MaterialType::Steel => "steel",
            MaterialType::Aluminum => "aluminum",
            MaterialType::Titanium => "titanium",
            MaterialType::Granite => "granite",
            MaterialType::Glass => "glass",
            MaterialType::Ceramic => "ceramic",
            MaterialType::Composite => "composite",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialType::Steel => "Steel",
            MaterialType::Aluminum => "Aluminum",
            MaterialType::Titanium => "Titanium",
            MaterialType::Granite => "Granite",
            MaterialType::Glass => "Glass",
            MaterialType::Ceramic => "Ceramic",
            MaterialType::Composite => "Composite",
        }
    }

    /// Brittle materials chip at high pressure; see
    /// [`advisories`](crate::calculations::validation::advisories).
    pub fn is_brittle(&self) -> bool {
        matches!(self, MaterialType::Glass | MaterialType::Ceramic)
    }

    /// Reference cutting properties for this material.
    pub const fn properties(&self) -> MaterialProperties {
        match self {
            MaterialType::Steel => MaterialProperties::new(1.0, 7850.0, 400.0, 1.0),
            MaterialType::Aluminum => MaterialProperties::new(1.3, 2700.0, 200.0, 0.8),
            MaterialType::Titanium => MaterialProperties::new(0.7, 4500.0, 900.0, 1.2),
            MaterialType::Granite => MaterialProperties::new(0.5, 2700.0, 150.0, 2.0),
            MaterialType::Glass => MaterialProperties::new(0.6, 2500.0, 50.0, 0.5),
            MaterialType::Ceramic => MaterialProperties::new(0.55, 2400.0, 300.0, 1.5),
            MaterialType::Composite => MaterialProperties::new(0.9, 1600.0, 250.0, 1.1),
        }
    }

    /// Parse a material identifier, rejecting unknown keys.
    ///
    /// Accepts any case and surrounding whitespace ("Steel", " GLASS ").
    pub fn from_key(s: &str) -> CalcResult<Self> {
        let key = s.trim().to_lowercase();
        MaterialType::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| CalcError::material_not_found(s))
    }

    /// Exact-match lookup, the way the engine resolves input record keys.
    pub fn from_record_key(key: &str) -> Option<Self> {
        MaterialType::ALL.iter().copied().find(|m| m.key() == key)
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cutting properties of a workpiece material.
///
/// `strength` is only ever used as a divisor in the speed regression, so its
/// unit just has to be consistent across the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Cutting efficiency coefficient k (dimensionless)
    pub k: f64,
    /// Density (kg/m³). Not used by the current formulas.
    pub density_kg_m3: f64,
    /// Material strength
    pub strength: f64,
    /// Surface roughness factor (dimensionless)
    pub roughness_factor: f64,
}

impl MaterialProperties {
    const fn new(k: f64, density_kg_m3: f64, strength: f64, roughness_factor: f64) -> Self {
        MaterialProperties {
            k,
            density_kg_m3,
            strength,
            roughness_factor,
        }
    }
}

/// The material table keyed by identifier.
pub static MATERIALS: Lazy<HashMap<&'static str, MaterialProperties>> = Lazy::new(|| {
    MaterialType::ALL
        .iter()
        .map(|m| (m.key(), m.properties()))
        .collect()
});

/// Look up a material by identifier, falling back to steel for unknown keys.
///
/// Keys are matched exactly, the way input records carry them.
pub fn lookup_material(key: &str) -> MaterialProperties {
    match MATERIALS.get(key) {
        Some(props) => *props,
        None => {
            tracing::debug!(material = key, "unknown material key, using steel");
            MaterialType::Steel.properties()
        }
    }
}

/// `(key, label)` pairs for material selection lists.
pub fn material_catalog() -> Vec<(&'static str, &'static str)> {
    MaterialType::ALL
        .iter()
        .map(|m| (m.key(), m.display_name()))
        .collect()
}
