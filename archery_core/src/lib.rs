//! # archery_core - Arrow Tuning Engine
//!
//! `archery_core` turns bow and arrow parameters into tuning advice: a
//! recommended spine range, manufacturer chart matches, total arrow weight,
//! grains per pound (GPP), front of center (FOC), and a three-level safety
//! verdict. All inputs and outputs are JSON-serializable.
//!
//! The formulas are linear approximations used by archers for shaft
//! selection, not a ballistic model.
//!
//! ## Quick Start
//!
//! ```rust
//! use archery_core::{create_default_configuration, generate_id, perform_safety_check};
//!
//! let config = create_default_configuration().build(generate_id()).unwrap();
//! let check = perform_safety_check(&config);
//! println!("overall: {}", check.overall);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Spine, manufacturer, weight and safety calculations
//! - [`reference`] - Embedded shaft, component and chart tables
//! - [`configuration`] - Saved setups and partial drafts
//! - [`storage`] - JSON file store with atomic saves and writer locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod configuration;
pub mod errors;
pub mod reference;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate_spine_recommendation, get_manufacturer_spine_recommendations, perform_safety_check,
    SafetyCheck, SafetyStatus, SpineRecommendation,
};
pub use configuration::{create_default_configuration, generate_id, ArrowConfiguration, ConfigurationDraft};
pub use errors::{CalcError, CalcResult};
pub use reference::ArrowMaterial;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::{load_configurations, save_configurations, ConfigStore};
