//! # Safety Classification
//!
//! Three independent checks, each classified as safe, warning or danger:
//!
//! | Check        | Danger       | Warning                   | Safe        |
//! |--------------|--------------|---------------------------|-------------|
//! | GPP          | < 5          | [5, 6) or > 10            | [6, 10]     |
//! | Overhang     | < 0.5"       | [0.5", 1") or > 3"        | [1", 3"]    |
//! | Spine        | > 100 out    | ≤ 100 outside the range   | in range    |
//!
//! The overall verdict is the most severe of the three. Every check is
//! always evaluated so each message is available to the caller.
//!
//! An out-of-range spine gets a softer message (same status) when it equals
//! a manufacturer chart recommendation for the setup, or when the shaft is
//! a recognized brand. Charts are looked up with the draw length standing
//! in for the arrow length. If the configuration has no shaft name, the shaft
//! table is searched by spine, weight and material.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::calculations::safety::{perform_safety_check, SafetyStatus};
//! use archery_core::configuration::create_default_configuration;
//!
//! let config = create_default_configuration().build("demo").unwrap();
//! let check = perform_safety_check(&config);
//! assert_eq!(check.gpp.status, SafetyStatus::Safe);
//! assert_eq!(check.arrow_length.status, SafetyStatus::Safe);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::manufacturer::match_manufacturer_charts;
use super::spine::calculate_spine_recommendation;
use crate::configuration::ArrowConfiguration;
use crate::reference::{self, is_from_known_manufacturer, ReferenceData};

/// Severity of a check result, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    #[default]
    Safe,
    Warning,
    Danger,
}

impl SafetyStatus {
    /// Most severe status in the iterator, `Safe` when empty
    pub fn most_severe(statuses: impl IntoIterator<Item = SafetyStatus>) -> SafetyStatus {
        statuses.into_iter().max().unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "safe",
            SafetyStatus::Warning => "warning",
            SafetyStatus::Danger => "danger",
        }
    }
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// GPP check with the value it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GppCheck {
    pub value: f64,
    pub status: SafetyStatus,
    pub message: String,
}

/// Status and message for a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub status: SafetyStatus,
    pub message: String,
}

impl CheckOutcome {
    fn new(status: SafetyStatus, message: impl Into<String>) -> Self {
        CheckOutcome {
            status,
            message: message.into(),
        }
    }
}

/// Full safety verdict for a configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gpp": { "value": 7.84, "status": "safe", "message": "GPP is in the optimal range for performance and safety." },
///   "arrow_length": { "status": "safe", "message": "Arrow length provides good safety margin." },
///   "spine": { "status": "warning", "message": "Spine is outside optimal range - consider tuning or different spine." },
///   "overall": "warning"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    pub gpp: GppCheck,
    pub arrow_length: CheckOutcome,
    pub spine: CheckOutcome,
    pub overall: SafetyStatus,
}

impl SafetyCheck {
    /// Assemble a verdict; `overall` is the most severe sub-check status.
    pub fn from_checks(gpp: GppCheck, arrow_length: CheckOutcome, spine: CheckOutcome) -> Self {
        let overall = SafetyStatus::most_severe([gpp.status, arrow_length.status, spine.status]);
        SafetyCheck {
            gpp,
            arrow_length,
            spine,
            overall,
        }
    }

    /// Messages of all non-safe checks, in check order
    pub fn concerns(&self) -> Vec<&str> {
        [
            (self.gpp.status, self.gpp.message.as_str()),
            (self.arrow_length.status, self.arrow_length.message.as_str()),
            (self.spine.status, self.spine.message.as_str()),
        ]
        .into_iter()
        .filter(|(status, _)| *status != SafetyStatus::Safe)
        .map(|(_, message)| message)
        .collect()
    }
}

/// Run all safety checks against the embedded reference data.
pub fn perform_safety_check(config: &ArrowConfiguration) -> SafetyCheck {
    perform_safety_check_with(config, reference::embedded())
}

/// Run all safety checks against the given reference data.
pub fn perform_safety_check_with(config: &ArrowConfiguration, data: &ReferenceData) -> SafetyCheck {
    let gpp = check_gpp(config.gpp);
    let arrow_length = check_arrow_length(config.draw_length, config.arrow_length);
    let spine = check_spine(config, data);

    let check = SafetyCheck::from_checks(gpp, arrow_length, spine);
    debug!(config = %config.id, overall = %check.overall, "safety check");
    check
}

/// Classify grains per pound.
pub fn check_gpp(gpp: f64) -> GppCheck {
    let (status, message) = if gpp < 5.0 {
        (
            SafetyStatus::Danger,
            "DANGER: GPP below 5 can damage your bow and is unsafe!",
        )
    } else if gpp < 6.0 {
        (
            SafetyStatus::Warning,
            "WARNING: GPP below 6 may reduce bow life and performance.",
        )
    } else if gpp > 10.0 {
        (
            SafetyStatus::Warning,
            "High GPP - arrow will be slow but very quiet.",
        )
    } else {
        (
            SafetyStatus::Safe,
            "GPP is in the optimal range for performance and safety.",
        )
    };

    GppCheck {
        value: gpp,
        status,
        message: message.to_string(),
    }
}

/// Classify the overhang implied by draw length and arrow length.
pub fn check_arrow_length(draw_length: f64, arrow_length: f64) -> CheckOutcome {
    let overhang = arrow_length - draw_length;

    if overhang < 0.5 {
        CheckOutcome::new(
            SafetyStatus::Danger,
            "DANGER: Arrow too short! Risk of overdraw and injury.",
        )
    } else if overhang < 1.0 {
        CheckOutcome::new(
            SafetyStatus::Warning,
            "WARNING: Minimal safety margin. Ensure consistent anchor point.",
        )
    } else if overhang > 3.0 {
        CheckOutcome::new(
            SafetyStatus::Warning,
            "Arrow is quite long - will reduce speed and increase wind drift.",
        )
    } else {
        CheckOutcome::new(
            SafetyStatus::Safe,
            "Arrow length provides good safety margin.",
        )
    }
}

/// Compare the chosen spine against the dynamic spine recommendation.
pub fn check_spine(config: &ArrowConfiguration, data: &ReferenceData) -> CheckOutcome {
    let recommendation = calculate_spine_recommendation(
        config.draw_weight,
        config.draw_length,
        config.point_weight,
        config.arrow_material,
    );

    if recommendation.contains(config.spine_value) {
        return CheckOutcome::new(
            SafetyStatus::Safe,
            "Spine is within the recommended range for your setup.",
        );
    }

    let chart_matches = match_manufacturer_charts(
        &data.charts,
        &data.adjustments,
        config.draw_weight,
        config.point_weight,
        config.draw_length,
    );
    let manufacturer_recommended = chart_matches
        .iter()
        .any(|rec| rec.recommended_spine == config.spine_value);

    let shaft_name = match config.shaft_name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => Some(name),
        None if config.shaft_weight != 0.0 => data
            .shafts
            .find_by_specs(config.spine_value, config.shaft_weight, config.arrow_material)
            .map(|shaft| shaft.name.as_str()),
        None => None,
    };
    let manufacturer_shaft = shaft_name.is_some_and(is_from_known_manufacturer);

    let difference = recommendation.distance_to_range(config.spine_value);
    debug!(
        spine = config.spine_value,
        min = recommendation.min_spine,
        max = recommendation.max_spine,
        difference,
        manufacturer_recommended,
        manufacturer_shaft,
        "spine outside recommended range"
    );

    if difference > 100.0 {
        let mut message =
            String::from("Spine is significantly outside recommended range - poor accuracy expected.");
        if manufacturer_recommended {
            message.push_str(" However, this spine matches a manufacturer recommendation, so it may still work well with proper tuning.");
        } else if manufacturer_shaft {
            message.push_str(" This is a manufacturer shaft, so the spine may be acceptable for your setup despite being outside the general recommended range. Consider professional tuning.");
        }
        CheckOutcome::new(SafetyStatus::Danger, message)
    } else {
        let mut message =
            String::from("Spine is outside optimal range - consider tuning or different spine.");
        if manufacturer_recommended {
            message.push_str(" This spine matches a manufacturer recommendation, so it should be acceptable with proper tuning.");
        } else if manufacturer_shaft {
            message.push_str(" This is a manufacturer shaft, so the spine difference may be acceptable with proper tuning and technique adjustments.");
        }
        CheckOutcome::new(SafetyStatus::Warning, message)
    }
}
