//! # Arrow Weight and Balance
//!
//! Total arrow weight, grains per pound (GPP), front of center (FOC), and
//! the point weight needed to reach a target GPP.
//!
//! ## FOC Model
//!
//! Moments are taken about the nock end. The point sits at the tip
//! (distance `L`); everything else (shaft, nock, fletching) is treated as
//! evenly distributed with its center of mass at `L/2`:
//!
//! ```text
//! balance = (point × L + (total − point) × L/2) / total
//! FOC %   = (balance − L/2) / L × 100
//! ```
//!
//! Positive FOC means the balance point is forward of center. The value is
//! not clamped.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::calculations::weight::*;
//!
//! let arrow_length = calculate_arrow_length(28.0, 1.0);
//! let total = calculate_total_weight(8.5, 28.0, 125.0, 8.0, 21.0);
//! assert_eq!(total, 392.0);
//! assert!((calculate_gpp(total, 50.0) - 7.84).abs() < 1e-9);
//! assert!(calculate_foc(arrow_length, 125.0, total) > 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// Lightest point the optimizer will suggest (grains)
pub const MIN_POINT_WEIGHT: f64 = 75.0;

/// Arrow length from draw length plus overhang (inches).
pub fn calculate_arrow_length(draw_length: f64, overhang: f64) -> f64 {
    draw_length + overhang
}

/// Total arrow weight in grains.
///
/// `shaft_weight` is grains per inch and is multiplied by `arrow_length`.
pub fn calculate_total_weight(
    shaft_weight: f64,
    arrow_length: f64,
    point_weight: f64,
    nock_weight: f64,
    fletching_weight: f64,
) -> f64 {
    let shaft_total = shaft_weight * arrow_length;
    shaft_total + point_weight + nock_weight + fletching_weight
}

/// Grains per pound of draw weight.
///
/// Not validated: a zero draw weight yields a non-finite value. Callers
/// should check `draw_weight > 0` first (see
/// [`ArrowConfiguration::validate`](crate::configuration::ArrowConfiguration::validate)).
pub fn calculate_gpp(total_weight: f64, draw_weight: f64) -> f64 {
    total_weight / draw_weight
}

/// Front of center percentage using the moment-balance model.
pub fn calculate_foc(arrow_length: f64, point_weight: f64, total_weight: f64) -> f64 {
    let rear_weight = total_weight - point_weight;
    let center = arrow_length / 2.0;

    let total_moment = point_weight * arrow_length + rear_weight * center;
    let balance_point = total_moment / total_weight;

    (balance_point - center) / arrow_length * 100.0
}

/// Point weight that brings the arrow to `desired_gpp`, never below
/// [`MIN_POINT_WEIGHT`].
///
/// `draw_length` is accepted for call-site symmetry with the other tuning
/// functions; the solution depends only on the weights and arrow length.
pub fn calculate_optimal_point_weight(
    draw_weight: f64,
    _draw_length: f64,
    desired_gpp: f64,
    shaft_weight: f64,
    arrow_length: f64,
    nock_weight: f64,
    fletching_weight: f64,
) -> f64 {
    let desired_total = desired_gpp * draw_weight;
    let fixed_weight = shaft_weight * arrow_length + nock_weight + fletching_weight;

    (desired_total - fixed_weight).max(MIN_POINT_WEIGHT)
}

/// Derived weight metrics for a complete arrow.
///
/// ## JSON Example
///
/// ```json
/// { "total_weight": 400.5, "gpp": 8.01, "foc": 15.61 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightMetrics {
    /// Total arrow weight (gr)
    pub total_weight: f64,
    /// Grains per pound
    pub gpp: f64,
    /// Front of center (%)
    pub foc: f64,
}

/// Inputs for [`calculate_weight_metrics`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightInput {
    /// Draw weight (lb)
    pub draw_weight: f64,
    /// Arrow length (in)
    pub arrow_length: f64,
    /// Shaft linear mass (gr/in)
    pub shaft_weight: f64,
    pub point_weight: f64,
    pub nock_weight: f64,
    pub fletching_weight: f64,
}

/// Total weight, GPP and FOC in one pass.
pub fn calculate_weight_metrics(input: &WeightInput) -> WeightMetrics {
    let total_weight = calculate_total_weight(
        input.shaft_weight,
        input.arrow_length,
        input.point_weight,
        input.nock_weight,
        input.fletching_weight,
    );

    WeightMetrics {
        total_weight,
        gpp: calculate_gpp(total_weight, input.draw_weight),
        foc: calculate_foc(input.arrow_length, input.point_weight, total_weight),
    }
}
