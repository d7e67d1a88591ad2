//! # Reference Data
//!
//! Read-only tables the tuning calculations consult:
//!
//! - **Shafts**: material, diameter, grains per inch, spine, product name
//! - **Components**: point, nock and fletching weights
//! - **Overhangs**: suggested overhang values with guidance
//! - **Manufacturer charts**: brand → series → ordered spine buckets
//! - **Adjustment factors**: point weight and arrow length spine deltas
//!
//! The tables are TOML documents compiled into the crate and parsed once,
//! on first use. Nothing in the crate mutates them.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::reference::{self, ArrowMaterial};
//!
//! let data = reference::embedded();
//! let fmj = data.shafts.find_by_specs(340.0, 8.5, ArrowMaterial::Carbon).unwrap();
//! assert_eq!(fmj.name, "Easton 4MM Full Metal Jacket 340");
//! ```

pub mod charts;
pub mod components;
pub mod material;
pub mod shafts;

pub use charts::{
    series_display_name, AdjustmentFactors, ManufacturerChart, ManufacturerCharts, SeriesChart,
    SpineBucket, CHART_BASELINE_ARROW_LENGTH, CHART_BASELINE_POINT_WEIGHT,
};
pub use components::{ComponentCategory, ComponentTable, ComponentWeight, OverhangOption, OverhangTable};
pub use material::{ArrowMaterial, SpineConstants};
pub use shafts::{is_from_known_manufacturer, ShaftData, ShaftTable, KNOWN_MANUFACTURERS};

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

const SHAFTS_TOML: &str = include_str!("../../data/shafts.toml");
const COMPONENTS_TOML: &str = include_str!("../../data/components.toml");
const OVERHANGS_TOML: &str = include_str!("../../data/overhangs.toml");
const MANUFACTURERS_TOML: &str = include_str!("../../data/manufacturers.toml");
const ADJUSTMENTS_TOML: &str = include_str!("../../data/adjustments.toml");

static EMBEDDED: Lazy<ReferenceData> = Lazy::new(|| match ReferenceData::from_embedded() {
    Ok(data) => data,
    // The tables are compiled in, so this only fires on a bad edit to data/*.toml
    Err(e) => panic!("embedded reference data is invalid: {}", e),
});

/// The complete set of reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub shafts: ShaftTable,
    pub components: ComponentTable,
    pub overhangs: OverhangTable,
    pub charts: ManufacturerCharts,
    pub adjustments: AdjustmentFactors,
}

impl ReferenceData {
    /// Parse the tables compiled into the crate.
    pub fn from_embedded() -> CalcResult<Self> {
        Self::from_toml_sources(
            SHAFTS_TOML,
            COMPONENTS_TOML,
            OVERHANGS_TOML,
            MANUFACTURERS_TOML,
            ADJUSTMENTS_TOML,
        )
    }

    /// Parse reference tables from TOML text (one document per table).
    pub fn from_toml_sources(
        shafts: &str,
        components: &str,
        overhangs: &str,
        manufacturers: &str,
        adjustments: &str,
    ) -> CalcResult<Self> {
        let data = ReferenceData {
            shafts: parse_table("shafts", shafts)?,
            components: parse_table("components", components)?,
            overhangs: parse_table("overhangs", overhangs)?,
            charts: parse_table("manufacturers", manufacturers)?,
            adjustments: parse_table("adjustments", adjustments)?,
        };

        let malformed = data.charts.malformed_series();
        if !malformed.is_empty() {
            return Err(CalcError::reference_data(
                "manufacturers",
                format!("inverted range in series: {}", malformed.join(", ")),
            ));
        }

        debug!(
            shafts = data.shafts.shafts.len(),
            components = data.components.components.len(),
            manufacturers = data.charts.manufacturers.len(),
            "loaded reference data"
        );
        Ok(data)
    }
}

/// The compiled-in reference tables, parsed on first access.
pub fn embedded() -> &'static ReferenceData {
    &EMBEDDED
}

fn parse_table<T: DeserializeOwned>(table: &str, source: &str) -> CalcResult<T> {
    toml::from_str(source).map_err(|e| CalcError::reference_data(table, e.to_string()))
}
