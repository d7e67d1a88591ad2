//! # Dynamic Spine Recommendation
//!
//! Estimates the dynamic spine a bow setup needs and snaps it to the spine
//! ratings shafts are actually sold in.
//!
//! ## Formula
//!
//! ```text
//! base  = draw_weight × 0.9 + (draw_length − 28) × 10
//! base += (point_weight − 125) × weight_factor
//! base *= base_modifier
//! ```
//!
//! `weight_factor` and `base_modifier` come from the shaft material (see
//! [`ArrowMaterial::spine_constants`]). The estimate is snapped to the
//! nearest entry of [`SPINE_LADDER`] and widened by ±50, clamped to the
//! ends of the ladder.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::calculations::spine::calculate_spine_recommendation;
//! use archery_core::reference::ArrowMaterial;
//!
//! let rec = calculate_spine_recommendation(50.0, 28.0, 125.0, ArrowMaterial::Carbon);
//! assert_eq!(rec.recommended, 200.0);
//! assert_eq!((rec.min_spine, rec.max_spine), (200.0, 250.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::reference::ArrowMaterial;

/// Spine ratings shafts are commonly sold in, stiffest first.
pub const SPINE_LADDER: [f64; 11] = [
    200.0, 250.0, 300.0, 340.0, 350.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0,
];

/// Stiffest spine a recommendation can reach
pub const MIN_SPINE: f64 = 200.0;

/// Weakest spine a recommendation can reach
pub const MAX_SPINE: f64 = 900.0;

/// Half-width of the acceptable range around the recommendation
pub const SPINE_TOLERANCE: f64 = 50.0;

const REFERENCE_DRAW_LENGTH: f64 = 28.0;
const REFERENCE_POINT_WEIGHT: f64 = 125.0;

/// Recommended spine and acceptable range for a setup.
///
/// ## JSON Example
///
/// ```json
/// {
///   "min_spine": 300.0,
///   "max_spine": 400.0,
///   "recommended": 350.0,
///   "material": "carbon",
///   "notes": ["Light point weight - spine may be too stiff"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpineRecommendation {
    /// Lower bound of the acceptable range (inclusive)
    pub min_spine: f64,
    /// Upper bound of the acceptable range (inclusive)
    pub max_spine: f64,
    /// Ladder spine closest to the estimate
    pub recommended: f64,
    pub material: ArrowMaterial,
    /// Advisory notes, in a fixed order
    pub notes: Vec<String>,
}

impl SpineRecommendation {
    /// Whether a spine value falls inside the acceptable range
    pub fn contains(&self, spine: f64) -> bool {
        spine >= self.min_spine && spine <= self.max_spine
    }

    /// Distance from a spine value to the nearer range bound
    pub fn distance_to_range(&self, spine: f64) -> f64 {
        (spine - self.min_spine).abs().min((spine - self.max_spine).abs())
    }
}

/// Raw (unsnapped) dynamic spine estimate
pub fn dynamic_spine_estimate(
    draw_weight: f64,
    draw_length: f64,
    point_weight: f64,
    material: ArrowMaterial,
) -> f64 {
    let constants = material.spine_constants();

    let mut spine = draw_weight * 0.9 + (draw_length - REFERENCE_DRAW_LENGTH) * 10.0;
    spine += (point_weight - REFERENCE_POINT_WEIGHT) * constants.weight_factor;
    spine * constants.base_modifier
}

/// Nearest ladder spine by absolute distance. Ties go to the stiffer
/// (earlier) entry; non-finite input lands on the first entry.
pub fn snap_to_ladder(spine: f64) -> f64 {
    SPINE_LADDER
        .iter()
        .copied()
        .fold(SPINE_LADDER[0], |best, candidate| {
            if (candidate - spine).abs() < (best - spine).abs() {
                candidate
            } else {
                best
            }
        })
}

/// Calculate a dynamic spine recommendation.
///
/// # Arguments
///
/// * `draw_weight` - Peak draw weight (lb)
/// * `draw_length` - Draw length (in)
/// * `point_weight` - Point weight (gr), typically 50-200
/// * `material` - Shaft material
///
/// Defined for any finite input; extreme inputs clamp to the ladder ends.
pub fn calculate_spine_recommendation(
    draw_weight: f64,
    draw_length: f64,
    point_weight: f64,
    material: ArrowMaterial,
) -> SpineRecommendation {
    let estimate = dynamic_spine_estimate(draw_weight, draw_length, point_weight, material);
    let recommended = snap_to_ladder(estimate);

    let min_spine = (recommended - SPINE_TOLERANCE).max(MIN_SPINE);
    let max_spine = (recommended + SPINE_TOLERANCE).min(MAX_SPINE);

    let mut notes = Vec::new();
    if point_weight > 150.0 {
        notes.push("Heavy point weight - consider stiffer spine".to_string());
    }
    if point_weight < 100.0 {
        notes.push("Light point weight - spine may be too stiff".to_string());
    }
    if draw_length > 30.0 {
        notes.push("Long draw length - may need stiffer spine".to_string());
    }
    if draw_length < 26.0 {
        notes.push("Short draw length - may need more flexible spine".to_string());
    }

    SpineRecommendation {
        min_spine,
        max_spine,
        recommended,
        material,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_carbon_baseline() {
        // 50 * 0.9 + 0 + 0 = 45
        let estimate = dynamic_spine_estimate(50.0, 28.0, 125.0, ArrowMaterial::Carbon);
        assert!((estimate - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_applies_material_constants() {
        // (40 * 0.9 + 20 + (100 - 125) * 0.5) * 0.9 = (36 + 20 - 12.5) * 0.9 = 39.15
        let estimate = dynamic_spine_estimate(40.0, 30.0, 100.0, ArrowMaterial::Aluminum);
        assert!((estimate - 39.15).abs() < 1e-9);
    }

    #[test]
    fn test_snap_nearest() {
        assert_eq!(snap_to_ladder(-1000.0), 200.0);
        assert_eq!(snap_to_ladder(320.0), 300.0);
        assert_eq!(snap_to_ladder(344.0), 340.0);
        assert_eq!(snap_to_ladder(346.0), 350.0);
        assert_eq!(snap_to_ladder(5000.0), 900.0);
    }

    #[test]
    fn test_snap_tie_goes_to_stiffer() {
        // Equidistant between 200 and 250
        assert_eq!(snap_to_ladder(225.0), 200.0);
        // Equidistant between 340 and 350
        assert_eq!(snap_to_ladder(345.0), 340.0);
        // Equidistant between 400 and 500
        assert_eq!(snap_to_ladder(450.0), 400.0);
    }

    #[test]
    fn test_snap_non_finite() {
        assert_eq!(snap_to_ladder(f64::NAN), 200.0);
    }

    #[test]
    fn test_recommendation_always_on_ladder() {
        for material in ArrowMaterial::ALL {
            for draw_weight in [0.0, 15.0, 40.0, 70.0, 250.0, 600.0, 1200.0] {
                for draw_length in [20.0, 26.0, 28.0, 31.0, 40.0] {
                    for point_weight in [50.0, 100.0, 125.0, 200.0] {
                        let rec = calculate_spine_recommendation(draw_weight, draw_length, point_weight, material);
                        assert!(SPINE_LADDER.contains(&rec.recommended));
                        assert!(rec.min_spine <= rec.recommended && rec.recommended <= rec.max_spine);
                        assert!(rec.min_spine >= MIN_SPINE && rec.max_spine <= MAX_SPINE);
                        if rec.recommended > 200.0 && rec.recommended < 900.0 {
                            assert_eq!(rec.max_spine - rec.min_spine, 100.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_range_clamped_at_ladder_ends() {
        let low = calculate_spine_recommendation(10.0, 28.0, 125.0, ArrowMaterial::Carbon);
        assert_eq!((low.min_spine, low.recommended, low.max_spine), (200.0, 200.0, 250.0));

        // 1000 * 0.9 = 900
        let high = calculate_spine_recommendation(1000.0, 28.0, 125.0, ArrowMaterial::Carbon);
        assert_eq!((high.min_spine, high.recommended, high.max_spine), (850.0, 900.0, 900.0));
    }

    #[test]
    fn test_mid_ladder_range() {
        // 400 * 0.9 = 360 -> 350
        let rec = calculate_spine_recommendation(400.0, 28.0, 125.0, ArrowMaterial::Carbon);
        assert_eq!(rec.recommended, 350.0);
        assert_eq!(rec.min_spine, 300.0);
        assert_eq!(rec.max_spine, 400.0);
        assert!(rec.contains(300.0) && rec.contains(400.0));
        assert!(!rec.contains(401.0));
        assert_eq!(rec.distance_to_range(520.0), 120.0);
    }

    #[test]
    fn test_notes_order_and_overlap() {
        let rec = calculate_spine_recommendation(50.0, 31.0, 175.0, ArrowMaterial::Wood);
        assert_eq!(
            rec.notes,
            vec![
                "Heavy point weight - consider stiffer spine".to_string(),
                "Long draw length - may need stiffer spine".to_string(),
            ]
        );

        let rec = calculate_spine_recommendation(50.0, 25.0, 85.0, ArrowMaterial::Carbon);
        assert_eq!(
            rec.notes,
            vec![
                "Light point weight - spine may be too stiff".to_string(),
                "Short draw length - may need more flexible spine".to_string(),
            ]
        );
    }

    #[test]
    fn test_notes_boundaries_exclusive() {
        let rec = calculate_spine_recommendation(50.0, 30.0, 150.0, ArrowMaterial::Carbon);
        assert!(rec.notes.is_empty());
        let rec = calculate_spine_recommendation(50.0, 26.0, 100.0, ArrowMaterial::Carbon);
        assert!(rec.notes.is_empty());
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = calculate_spine_recommendation(50.0, 28.0, 85.0, ArrowMaterial::Carbon);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"material\":\"carbon\""));
        let roundtrip: SpineRecommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, roundtrip);
    }
}
