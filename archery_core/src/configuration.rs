//! # Arrow Configurations
//!
//! An [`ArrowConfiguration`] is one saved bow/arrow setup: the physical
//! inputs plus the derived weight metrics. Derived fields are a cache of
//! [`calculate_weight_metrics`] and are rebuilt whenever a record is
//! replaced through [`ArrowConfiguration::recalculated`].
//!
//! Partial setups (user input in progress, the default seeds) are held in a
//! [`ConfigurationDraft`], whose fields are all optional.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::configuration::{create_default_configuration, generate_id};
//!
//! let mut draft = create_default_configuration();
//! draft.draw_weight = Some(45.0);
//!
//! let config = draft.build(generate_id()).unwrap();
//! assert_eq!(config.arrow_length, 29.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::weight::{calculate_arrow_length, calculate_weight_metrics, WeightInput};
use crate::errors::{CalcError, CalcResult};
use crate::reference::ArrowMaterial;

/// Name given to a configuration created from the default seeds
pub const DEFAULT_CONFIGURATION_NAME: &str = "New Setup";

/// A complete, saved arrow setup.
///
/// Lengths are inches, component weights are grains, `shaft_weight` is
/// grains per inch and `draw_weight` is pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowConfiguration {
    pub id: String,
    pub name: String,

    pub draw_length: f64,
    pub draw_weight: f64,
    pub arrow_length: f64,
    pub overhang: f64,
    pub shaft_weight: f64,
    pub point_weight: f64,
    pub nock_weight: f64,
    pub fletching_weight: f64,
    pub arrow_material: ArrowMaterial,
    pub spine_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_name: Option<String>,

    // Derived
    pub total_weight: f64,
    pub gpp: f64,
    pub foc: f64,
}

impl ArrowConfiguration {
    /// Weight engine inputs for this setup
    pub fn weight_input(&self) -> WeightInput {
        WeightInput {
            draw_weight: self.draw_weight,
            arrow_length: self.arrow_length,
            shaft_weight: self.shaft_weight,
            point_weight: self.point_weight,
            nock_weight: self.nock_weight,
            fletching_weight: self.fletching_weight,
        }
    }

    /// A copy with `total_weight`, `gpp` and `foc` recomputed from the
    /// physical inputs.
    pub fn recalculated(self) -> Self {
        let metrics = calculate_weight_metrics(&self.weight_input());
        ArrowConfiguration {
            total_weight: metrics.total_weight,
            gpp: metrics.gpp,
            foc: metrics.foc,
            ..self
        }
    }

    /// Check the physical inputs are usable.
    ///
    /// Draw weight, draw length and arrow length must be positive; shaft
    /// and component weights must not be negative. The calculation
    /// functions themselves do not check this.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("draw_weight", self.draw_weight)?;
        require_positive("draw_length", self.draw_length)?;
        require_positive("arrow_length", self.arrow_length)?;

        require_non_negative("shaft_weight", self.shaft_weight)?;
        require_non_negative("point_weight", self.point_weight)?;
        require_non_negative("nock_weight", self.nock_weight)?;
        require_non_negative("fletching_weight", self.fletching_weight)?;

        if !self.spine_value.is_finite() {
            return Err(CalcError::invalid_input(
                "spine_value",
                self.spine_value.to_string(),
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "must be greater than zero"))
    }
}

fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "must not be negative"))
    }
}

/// A configuration that may still be missing inputs.
///
/// Derived fields are not part of a draft; [`ConfigurationDraft::build`]
/// computes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationDraft {
    pub name: Option<String>,
    pub draw_length: Option<f64>,
    pub draw_weight: Option<f64>,
    pub arrow_length: Option<f64>,
    pub overhang: Option<f64>,
    pub shaft_weight: Option<f64>,
    pub point_weight: Option<f64>,
    pub nock_weight: Option<f64>,
    pub fletching_weight: Option<f64>,
    pub arrow_material: Option<ArrowMaterial>,
    pub spine_value: Option<f64>,
    pub shaft_name: Option<String>,
}

impl ConfigurationDraft {
    /// Complete the draft into a configuration with the given id.
    ///
    /// A missing `arrow_length` is derived from draw length plus overhang.
    /// Any other missing input is a [`CalcError::MissingField`]; a missing
    /// `shaft_name` is allowed.
    pub fn build(self, id: impl Into<String>) -> CalcResult<ArrowConfiguration> {
        let draw_length = required("draw_length", self.draw_length)?;
        let overhang = required("overhang", self.overhang)?;
        let arrow_length = self
            .arrow_length
            .unwrap_or_else(|| calculate_arrow_length(draw_length, overhang));

        let config = ArrowConfiguration {
            id: id.into(),
            name: required("name", self.name)?,
            draw_length,
            draw_weight: required("draw_weight", self.draw_weight)?,
            arrow_length,
            overhang,
            shaft_weight: required("shaft_weight", self.shaft_weight)?,
            point_weight: required("point_weight", self.point_weight)?,
            nock_weight: required("nock_weight", self.nock_weight)?,
            fletching_weight: required("fletching_weight", self.fletching_weight)?,
            arrow_material: required("arrow_material", self.arrow_material)?,
            spine_value: required("spine_value", self.spine_value)?,
            shaft_name: self.shaft_name,
            total_weight: 0.0,
            gpp: 0.0,
            foc: 0.0,
        };

        Ok(config.recalculated())
    }
}

impl From<ArrowConfiguration> for ConfigurationDraft {
    fn from(config: ArrowConfiguration) -> Self {
        ConfigurationDraft {
            name: Some(config.name),
            draw_length: Some(config.draw_length),
            draw_weight: Some(config.draw_weight),
            arrow_length: Some(config.arrow_length),
            overhang: Some(config.overhang),
            shaft_weight: Some(config.shaft_weight),
            point_weight: Some(config.point_weight),
            nock_weight: Some(config.nock_weight),
            fletching_weight: Some(config.fletching_weight),
            arrow_material: Some(config.arrow_material),
            spine_value: Some(config.spine_value),
            shaft_name: config.shaft_name,
        }
    }
}

fn required<T>(field: &str, value: Option<T>) -> CalcResult<T> {
    value.ok_or_else(|| CalcError::missing_field(field))
}

/// Seed values for a new setup: a 50 lb bow at 28" draw shooting a
/// 125 gr point on an Easton FMJ 340. Arrow length is left to be derived.
pub fn create_default_configuration() -> ConfigurationDraft {
    ConfigurationDraft {
        name: Some(DEFAULT_CONFIGURATION_NAME.to_string()),
        draw_length: Some(28.0),
        draw_weight: Some(50.0),
        arrow_length: None,
        overhang: Some(1.0),
        shaft_weight: Some(8.5),
        point_weight: Some(125.0),
        nock_weight: Some(8.0),
        fletching_weight: Some(21.0),
        arrow_material: Some(ArrowMaterial::Carbon),
        spine_value: Some(340.0),
        shaft_name: Some("Easton 4MM Full Metal Jacket 340".to_string()),
    }
}

/// A fresh unique configuration id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
