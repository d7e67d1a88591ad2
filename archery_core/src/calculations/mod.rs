//! # Tuning Calculations
//!
//! Pure functions over plain numbers. Nothing here does I/O or keeps
//! state; the only shared input is the read-only reference data.
//!
//! - [`spine`] - Dynamic spine estimate snapped to the spine ladder
//! - [`manufacturer`] - Brand/series chart lookup with length and point adjustments
//! - [`weight`] - Total weight, GPP, FOC and optimal point weight
//! - [`safety`] - Safe/warning/danger verdict for a whole configuration
//!
//! Results are JSON-serializable so they can be printed as-is by the CLI.

pub mod manufacturer;
pub mod safety;
pub mod spine;
pub mod weight;

pub use manufacturer::{get_manufacturer_spine_recommendations, Confidence, ManufacturerRecommendation};
pub use safety::{perform_safety_check, CheckOutcome, GppCheck, SafetyCheck, SafetyStatus};
pub use spine::{calculate_spine_recommendation, SpineRecommendation, SPINE_LADDER};
pub use weight::{
    calculate_arrow_length, calculate_foc, calculate_gpp, calculate_optimal_point_weight,
    calculate_total_weight, calculate_weight_metrics, WeightInput, WeightMetrics,
};
