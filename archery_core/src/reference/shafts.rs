//! Shaft Specifications
//!
//! Read-only table of commercially available shafts, used to look up a
//! shaft by name or to identify one from its spine, weight and material.

use serde::{Deserialize, Serialize};

use super::material::ArrowMaterial;
use crate::errors::{CalcError, CalcResult};

/// Brands treated as recognized manufacturers by the spine safety check.
pub const KNOWN_MANUFACTURERS: [&str; 9] = [
    "Black Eagle",
    "Easton",
    "Carbon Express",
    "Gold Tip",
    "Victory",
    "Beman",
    "PSE",
    "Bloodsport",
    "Maxima",
];

/// A single shaft specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaftData {
    /// Product name, e.g. "Easton 4MM Full Metal Jacket 340"
    pub name: String,
    /// Shaft material
    pub material: ArrowMaterial,
    /// Outside diameter (mm)
    pub diameter_mm: f64,
    /// Linear mass (grains per inch)
    pub weight_gpi: f64,
    /// Static spine rating
    pub spine: f64,
}

/// The shaft reference table, in source order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShaftTable {
    #[serde(rename = "shaft", default)]
    pub shafts: Vec<ShaftData>,
}

impl ShaftTable {
    /// All shafts
    pub fn all(&self) -> &[ShaftData] {
        &self.shafts
    }

    /// Shafts of one material, in table order
    pub fn for_material(&self, material: ArrowMaterial) -> impl Iterator<Item = &ShaftData> {
        self.shafts.iter().filter(move |s| s.material == material)
    }

    /// First shaft whose spine, weight and material all match exactly.
    pub fn find_by_specs(&self, spine: f64, weight_gpi: f64, material: ArrowMaterial) -> Option<&ShaftData> {
        self.shafts
            .iter()
            .find(|s| s.spine == spine && s.weight_gpi == weight_gpi && s.material == material)
    }

    /// Look up a shaft by name (case-insensitive, surrounding whitespace ignored)
    pub fn find_by_name(&self, name: &str) -> CalcResult<&ShaftData> {
        let wanted = name.trim().to_lowercase();
        self.shafts
            .iter()
            .find(|s| s.name.to_lowercase() == wanted)
            .ok_or_else(|| CalcError::shaft_not_found(name))
    }
}

/// Whether a shaft name contains one of the [`KNOWN_MANUFACTURERS`].
///
/// ```rust
/// use archery_core::reference::is_from_known_manufacturer;
///
/// assert!(is_from_known_manufacturer("easton bloodline 340"));
/// assert!(!is_from_known_manufacturer("Homemade Bamboo"));
/// ```
pub fn is_from_known_manufacturer(shaft_name: &str) -> bool {
    let name = shaft_name.to_lowercase();
    KNOWN_MANUFACTURERS
        .iter()
        .any(|brand| name.contains(&brand.to_lowercase()))
}
