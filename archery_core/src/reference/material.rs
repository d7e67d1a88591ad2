//! Arrow shaft materials and their dynamic spine constants.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Shaft material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArrowMaterial {
    /// Carbon fiber (including metal-jacketed carbon)
    #[default]
    Carbon,
    /// Aluminum
    Aluminum,
    /// Wood (cedar, pine, etc.)
    Wood,
}

/// Constants that scale the dynamic spine formula for a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpineConstants {
    /// Multiplier applied to the whole spine estimate
    pub base_modifier: f64,
    /// Spine change per grain of point weight away from 125 gr
    pub weight_factor: f64,
    /// Length sensitivity of the material. Carried with the constants but
    /// not part of the current spine formula.
    pub length_factor: f64,
}

impl ArrowMaterial {
    /// All material variants for UI selection
    pub const ALL: [ArrowMaterial; 3] = [
        ArrowMaterial::Carbon,
        ArrowMaterial::Aluminum,
        ArrowMaterial::Wood,
    ];

    /// Spine formula constants for this material
    pub fn spine_constants(&self) -> SpineConstants {
        match self {
            ArrowMaterial::Carbon => SpineConstants {
                base_modifier: 1.0,
                weight_factor: 0.4,
                length_factor: 0.8,
            },
            ArrowMaterial::Aluminum => SpineConstants {
                base_modifier: 0.9,
                weight_factor: 0.5,
                length_factor: 0.7,
            },
            ArrowMaterial::Wood => SpineConstants {
                base_modifier: 0.8,
                weight_factor: 0.6,
                length_factor: 0.6,
            },
        }
    }

    /// Lowercase code as stored in JSON and reference tables
    pub fn code(&self) -> &'static str {
        match self {
            ArrowMaterial::Carbon => "carbon",
            ArrowMaterial::Aluminum => "aluminum",
            ArrowMaterial::Wood => "wood",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ArrowMaterial::Carbon => "Carbon",
            ArrowMaterial::Aluminum => "Aluminum",
            ArrowMaterial::Wood => "Wood",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "carbon" | "c" | "carbon fiber" | "cf" => Ok(ArrowMaterial::Carbon),
            "aluminum" | "aluminium" | "al" | "alu" => Ok(ArrowMaterial::Aluminum),
            "wood" | "w" | "cedar" | "wooden" => Ok(ArrowMaterial::Wood),
            _ => Err(CalcError::invalid_input(
                "arrow_material",
                s,
                "Expected one of: carbon, aluminum, wood",
            )),
        }
    }
}

impl std::fmt::Display for ArrowMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ArrowMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}
