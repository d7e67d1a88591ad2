//! Manufacturer Spine Charts
//!
//! Brand/series spine charts keyed by draw weight and point weight buckets,
//! plus the fractional adjustment factors for arrow length and point weight.
//!
//! Charts are published for a 28" arrow with a 100 grain point. Buckets in
//! a series are scanned in order; the first bucket whose closed ranges
//! contain both inputs is the match. The published ranges are not proven
//! disjoint and are used as-is.

use serde::{Deserialize, Serialize};

/// Arrow length (inches) the charts are published for
pub const CHART_BASELINE_ARROW_LENGTH: f64 = 28.0;

/// Point weight (grains) the charts are published for
pub const CHART_BASELINE_POINT_WEIGHT: f64 = 100.0;

/// One row of a spine chart. Ranges are `[low, high]`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpineBucket {
    pub draw_weight: [f64; 2],
    pub point_weight: [f64; 2],
    pub spine: f64,
}

impl SpineBucket {
    pub fn contains(&self, draw_weight: f64, point_weight: f64) -> bool {
        draw_weight >= self.draw_weight[0]
            && draw_weight <= self.draw_weight[1]
            && point_weight >= self.point_weight[0]
            && point_weight <= self.point_weight[1]
    }

    fn is_well_formed(&self) -> bool {
        self.draw_weight[0] <= self.draw_weight[1] && self.point_weight[0] <= self.point_weight[1]
    }
}

/// A product series and its ordered buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    /// Internal series key, e.g. "fmj4mm"
    pub key: String,
    #[serde(rename = "bucket", default)]
    pub buckets: Vec<SpineBucket>,
}

impl SeriesChart {
    /// First bucket containing both inputs
    pub fn first_match(&self, draw_weight: f64, point_weight: f64) -> Option<&SpineBucket> {
        self.buckets.iter().find(|b| b.contains(draw_weight, point_weight))
    }

    pub fn display_name(&self) -> String {
        series_display_name(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerChart {
    /// Display name, e.g. "Black Eagle"
    pub name: String,
    #[serde(rename = "series", default)]
    pub series: Vec<SeriesChart>,
}

/// All manufacturer charts, in table order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerCharts {
    #[serde(rename = "manufacturer", default)]
    pub manufacturers: Vec<ManufacturerChart>,
}

impl ManufacturerCharts {
    /// Every `(manufacturer, series)` pair in table order
    pub fn series(&self) -> impl Iterator<Item = (&ManufacturerChart, &SeriesChart)> {
        self.manufacturers
            .iter()
            .flat_map(|m| m.series.iter().map(move |s| (m, s)))
    }

    /// Keys of series containing an inverted range
    pub(crate) fn malformed_series(&self) -> Vec<String> {
        self.series()
            .filter(|(_, s)| s.buckets.iter().any(|b| !b.is_well_formed()))
            .map(|(m, s)| format!("{}/{}", m.name, s.key))
            .collect()
    }
}

/// Display name for a series key.
///
/// ```rust
/// use archery_core::reference::series_display_name;
///
/// assert_eq!(series_display_name("fmj4mm"), "FMJ 4mm");
/// assert_eq!(series_display_name("outlaw"), "Outlaw");
/// ```
pub fn series_display_name(key: &str) -> String {
    match key {
        "fmj4mm" => "FMJ 4mm".to_string(),
        "axisTraditional" => "Axis Traditional".to_string(),
        "matchGrade" => "6.5mm Match Grade".to_string(),
        _ => {
            let mut chars = key.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointWeightFactor {
    pub grains: f64,
    pub factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowLengthFactor {
    pub inches: f64,
    pub factor: f64,
}

/// Fractional spine adjustments keyed by exact point weight and arrow length.
///
/// A factor of `+0.05` means the chart spine number is scaled by `1.05`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    /// General tuning guidance shown alongside chart results
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub point_weight: Vec<PointWeightFactor>,
    #[serde(default)]
    pub arrow_length: Vec<ArrowLengthFactor>,
}

impl AdjustmentFactors {
    /// Factor for an exact point weight key, if one is listed
    pub fn point_weight_factor(&self, point_weight: f64) -> Option<f64> {
        self.point_weight
            .iter()
            .find(|f| f.grains == point_weight)
            .map(|f| f.factor)
    }

    /// Factor for an exact arrow length key, if one is listed
    pub fn arrow_length_factor(&self, arrow_length: f64) -> Option<f64> {
        self.arrow_length
            .iter()
            .find(|f| f.inches == arrow_length)
            .map(|f| f.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::embedded;

    #[test]
    fn test_series_display_names() {
        assert_eq!(series_display_name("axisTraditional"), "Axis Traditional");
        assert_eq!(series_display_name("matchGrade"), "6.5mm Match Grade");
        assert_eq!(series_display_name("xImpact"), "XImpact");
        assert_eq!(series_display_name("bloodline"), "Bloodline");
        assert_eq!(series_display_name(""), "");
    }

    #[test]
    fn test_chart_order_preserved() {
        let charts = &embedded().charts;
        let keys: Vec<&str> = charts.series().map(|(_, s)| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["outlaw", "spartan", "xImpact", "fmj4mm", "axisTraditional", "bloodline", "matchGrade"]
        );
        let buckets: usize = charts.series().map(|(_, s)| s.buckets.len()).sum();
        assert_eq!(buckets, 39);
    }

    #[test]
    fn test_bucket_bounds_inclusive() {
        let bucket = SpineBucket {
            draw_weight: [45.0, 49.0],
            point_weight: [100.0, 125.0],
            spine: 350.0,
        };
        assert!(bucket.contains(45.0, 100.0));
        assert!(bucket.contains(49.0, 125.0));
        assert!(!bucket.contains(49.5, 125.0));
        assert!(!bucket.contains(45.0, 126.0));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let series = SeriesChart {
            key: "overlap".to_string(),
            buckets: vec![
                SpineBucket { draw_weight: [40.0, 50.0], point_weight: [100.0, 125.0], spine: 400.0 },
                SpineBucket { draw_weight: [45.0, 55.0], point_weight: [100.0, 125.0], spine: 340.0 },
            ],
        };
        assert_eq!(series.first_match(47.0, 100.0).unwrap().spine, 400.0);
        assert_eq!(series.first_match(52.0, 100.0).unwrap().spine, 340.0);
        assert!(series.first_match(60.0, 100.0).is_none());
    }

    #[test]
    fn test_adjustment_factor_exact_keys() {
        let factors = &embedded().adjustments;
        assert_eq!(factors.point_weight_factor(125.0), Some(0.05));
        assert_eq!(factors.point_weight_factor(150.0), Some(0.10));
        assert_eq!(factors.point_weight_factor(120.0), None);
        assert_eq!(factors.arrow_length_factor(30.0), Some(-0.08));
        assert_eq!(factors.arrow_length_factor(29.5), None);
        assert_eq!(factors.notes.len(), 5);
    }
}
