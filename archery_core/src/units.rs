//! # Unit Types
//!
//! Lightweight newtype wrappers for the units archers work in. Tuning
//! formulas take plain `f64` values in these units; the wrappers carry the
//! metric conversions used for display.
//!
//! ## Archery Units (Primary)
//!
//! - Mass: grains (gr). 7000 gr = 1 lb.
//! - Linear mass: grains per inch (gpi) for shafts
//! - Length: inches (in)
//! - Draw force: pounds (lb)
//!
//! ## Example
//!
//! ```rust
//! use archery_core::units::{Grains, GrainsPerInch, Inches, Pounds};
//!
//! let shaft = GrainsPerInch(8.5) * Inches(28.0);
//! assert_eq!(shaft, Grains(238.0));
//!
//! let gpp = Grains(392.0) / Pounds(50.0);
//! assert!((gpp - 7.84).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul};

const GRAMS_PER_GRAIN: f64 = 0.064_798_91;
const CM_PER_INCH: f64 = 2.54;
const KG_PER_POUND: f64 = 0.453_592_37;

/// Mass in grains
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grains(pub f64);

impl Grains {
    /// Convert to grams
    pub fn grams(self) -> f64 {
        self.0 * GRAMS_PER_GRAIN
    }
}

impl Add for Grains {
    type Output = Grains;
    fn add(self, rhs: Grains) -> Grains {
        Grains(self.0 + rhs.0)
    }
}

/// Grains divided by draw weight gives grains per pound (GPP)
impl Div<Pounds> for Grains {
    type Output = f64;
    fn div(self, rhs: Pounds) -> f64 {
        self.0 / rhs.0
    }
}

/// Shaft linear mass in grains per inch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrainsPerInch(pub f64);

impl GrainsPerInch {
    /// Convert to grams per centimeter
    pub fn grams_per_cm(self) -> f64 {
        self.0 * GRAMS_PER_GRAIN / CM_PER_INCH
    }
}

impl Mul<Inches> for GrainsPerInch {
    type Output = Grains;
    fn mul(self, rhs: Inches) -> Grains {
        Grains(self.0 * rhs.0)
    }
}

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl Inches {
    /// Convert to centimeters
    pub fn cm(self) -> f64 {
        self.0 * CM_PER_INCH
    }
}

impl Add for Inches {
    type Output = Inches;
    fn add(self, rhs: Inches) -> Inches {
        Inches(self.0 + rhs.0)
    }
}

/// Draw force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl Pounds {
    /// Convert to kilograms-force
    pub fn kg(self) -> f64 {
        self.0 * KG_PER_POUND
    }
}
