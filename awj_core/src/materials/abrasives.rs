//! Abrasive Grit Sizes
//!
//! The mesh sizes offered for garnet-type abrasives, with nominal particle
//! sizes. Mesh number is inversely related to particle size: 50 mesh is
//! coarse, 120 mesh is fine.
//!
//! The engine accepts any mesh number (it only feeds the roughness model);
//! this catalog is what selection lists and the CLI present.

use serde::{Deserialize, Serialize};

/// Standard abrasive mesh size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeshSize {
    /// 50 mesh (297 µm)
    #[serde(rename = "50")]
    Mesh50,
    /// 80 mesh (177 µm), the general purpose grit
    #[default]
    #[serde(rename = "80")]
    Mesh80,
    /// 120 mesh (125 µm)
    #[serde(rename = "120")]
    Mesh120,
}

impl MeshSize {
    /// All mesh sizes for UI selection (coarse to fine)
    pub const ALL: [MeshSize; 3] = [MeshSize::Mesh50, MeshSize::Mesh80, MeshSize::Mesh120];

    /// Mesh number as fed to the roughness model
    pub fn mesh_number(&self) -> f64 {
        match self {
            MeshSize::Mesh50 => 50.0,
            MeshSize::Mesh80 => 80.0,
            MeshSize::Mesh120 => 120.0,
        }
    }

    /// Nominal particle size in micrometers
    pub fn particle_size_um(&self) -> f64 {
        match self {
            MeshSize::Mesh50 => 297.0,
            MeshSize::Mesh80 => 177.0,
            MeshSize::Mesh120 => 125.0,
        }
    }

    /// Find the catalog entry for a mesh number, if it is a standard size
    pub fn from_mesh_number(mesh: f64) -> Option<Self> {
        MeshSize::ALL.iter().copied().find(|m| m.mesh_number() == mesh)
    }

    /// Get display name, e.g. "80 mesh (177 µm)"
    pub fn display_name(&self) -> String {
        format!("{:.0} mesh ({:.0} µm)", self.mesh_number(), self.particle_size_um())
    }
}

impl std::fmt::Display for MeshSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_80_mesh() {
        assert_eq!(MeshSize::default().mesh_number(), 80.0);
    }

    #[test]
    fn test_finer_mesh_has_smaller_particles() {
        for pair in MeshSize::ALL.windows(2) {
            assert!(pair[0].mesh_number() < pair[1].mesh_number());
            assert!(pair[0].particle_size_um() > pair[1].particle_size_um());
        }
    }

    #[test]
    fn test_from_mesh_number() {
        assert_eq!(MeshSize::from_mesh_number(120.0), Some(MeshSize::Mesh120));
        assert_eq!(MeshSize::from_mesh_number(100.0), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(MeshSize::Mesh50.display_name(), "50 mesh (297 µm)");
    }
}
