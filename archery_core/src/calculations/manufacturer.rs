//! # Manufacturer Spine Matching
//!
//! Looks up each brand/series spine chart for a draw weight and point
//! weight, then rescales the chart spine for arrow lengths and point
//! weights other than the chart baseline (28", 100 gr).
//!
//! ## Adjustment Rules
//!
//! - At most one bucket per series: the first whose closed ranges contain
//!   both the draw weight and the point weight.
//! - Arrow length ≠ 28" with an exact factor listed: `spine = round(spine × (1 + f))`
//! - Point weight ≠ 100 gr with an exact factor listed: same rescale, applied
//!   after the length adjustment.
//! - Any applied adjustment downgrades confidence from high to medium.
//!
//! Results are sorted by spine, ascending; series with equal spines keep
//! table order.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::calculations::manufacturer::{get_manufacturer_spine_recommendations, Confidence};
//!
//! let recs = get_manufacturer_spine_recommendations(47.0, 100.0, 28.0);
//! assert!(recs.iter().all(|r| r.confidence == Confidence::High));
//! assert!(recs.windows(2).all(|w| w[0].recommended_spine <= w[1].recommended_spine));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reference::{
    self, AdjustmentFactors, ManufacturerCharts, CHART_BASELINE_ARROW_LENGTH,
    CHART_BASELINE_POINT_WEIGHT,
};

/// How closely a chart result applies to the queried setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Read straight off the chart
    High,
    /// Chart value rescaled by one or more adjustment factors
    Medium,
    /// Never produced by the chart matcher; kept so stored results can carry it
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        write!(f, "{}", label)
    }
}

/// A spine recommendation from one manufacturer's series chart.
///
/// ## JSON Example
///
/// ```json
/// {
///   "manufacturer": "Easton",
///   "series": "FMJ 4mm",
///   "recommended_spine": 314.0,
///   "confidence": "medium",
///   "notes": ["Adjusted for 29\" arrow length", "Adjusted for 125gr point weight"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerRecommendation {
    pub manufacturer: String,
    /// Series display name
    pub series: String,
    pub recommended_spine: f64,
    pub confidence: Confidence,
    pub notes: Vec<String>,
}

/// Match a setup against the embedded manufacturer charts.
///
/// Pass [`CHART_BASELINE_ARROW_LENGTH`] (28") when the arrow length is
/// unknown; it applies no length adjustment.
pub fn get_manufacturer_spine_recommendations(
    draw_weight: f64,
    point_weight: f64,
    arrow_length: f64,
) -> Vec<ManufacturerRecommendation> {
    let data = reference::embedded();
    match_manufacturer_charts(&data.charts, &data.adjustments, draw_weight, point_weight, arrow_length)
}

/// Match a setup against the given charts and adjustment factors.
pub fn match_manufacturer_charts(
    charts: &ManufacturerCharts,
    adjustments: &AdjustmentFactors,
    draw_weight: f64,
    point_weight: f64,
    arrow_length: f64,
) -> Vec<ManufacturerRecommendation> {
    let mut recommendations: Vec<ManufacturerRecommendation> = charts
        .series()
        .filter_map(|(manufacturer, series)| {
            let bucket = series.first_match(draw_weight, point_weight)?;

            let mut spine = bucket.spine;
            let mut confidence = Confidence::High;
            let mut notes = Vec::new();

            if arrow_length != CHART_BASELINE_ARROW_LENGTH {
                if let Some(factor) = adjustments.arrow_length_factor(arrow_length) {
                    spine = (spine * (1.0 + factor)).round();
                    notes.push(format!("Adjusted for {}\" arrow length", arrow_length));
                    confidence = Confidence::Medium;
                }
            }

            if point_weight != CHART_BASELINE_POINT_WEIGHT {
                if let Some(factor) = adjustments.point_weight_factor(point_weight) {
                    spine = (spine * (1.0 + factor)).round();
                    notes.push(format!("Adjusted for {}gr point weight", point_weight));
                    if confidence == Confidence::High {
                        confidence = Confidence::Medium;
                    }
                }
            }

            debug!(
                manufacturer = %manufacturer.name,
                series = %series.key,
                chart_spine = bucket.spine,
                adjusted_spine = spine,
                "manufacturer chart match"
            );

            Some(ManufacturerRecommendation {
                manufacturer: manufacturer.name.clone(),
                series: series.display_name(),
                recommended_spine: spine,
                confidence,
                notes,
            })
        })
        .collect();

    // sort_by is stable, so equal spines keep chart order
    recommendations.sort_by(|a, b| a.recommended_spine.total_cmp(&b.recommended_spine));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ManufacturerChart, SeriesChart, SpineBucket};

    fn find<'a>(recs: &'a [ManufacturerRecommendation], series: &str) -> &'a ManufacturerRecommendation {
        recs.iter().find(|r| r.series == series).unwrap()
    }

    #[test]
    fn test_baseline_match_is_high_confidence() {
        // 47 lb, 100 gr, 28": outlaw 350, spartan 350, xImpact 400, Easton 340 x3, matchGrade 340
        let recs = get_manufacturer_spine_recommendations(47.0, 100.0, 28.0);
        assert_eq!(recs.len(), 7);
        assert!(recs.iter().all(|r| r.confidence == Confidence::High && r.notes.is_empty()));

        let spines: Vec<f64> = recs.iter().map(|r| r.recommended_spine).collect();
        assert_eq!(spines, vec![340.0, 340.0, 340.0, 340.0, 350.0, 350.0, 400.0]);
    }

    #[test]
    fn test_ties_keep_table_order() {
        let recs = get_manufacturer_spine_recommendations(47.0, 100.0, 28.0);
        let series: Vec<&str> = recs.iter().map(|r| r.series.as_str()).collect();
        assert_eq!(
            series,
            vec![
                "FMJ 4mm",
                "Axis Traditional",
                "Bloodline",
                "6.5mm Match Grade",
                "Outlaw",
                "Spartan",
                "XImpact",
            ]
        );
        assert_eq!(recs[0].manufacturer, "Easton");
        assert_eq!(recs[4].manufacturer, "Black Eagle");
    }

    #[test]
    fn test_length_adjustment() {
        // 30": factor -0.08. Outlaw 350 -> round(322.0) = 322
        let recs = get_manufacturer_spine_recommendations(47.0, 100.0, 30.0);
        let outlaw = find(&recs, "Outlaw");
        assert_eq!(outlaw.recommended_spine, 322.0);
        assert_eq!(outlaw.confidence, Confidence::Medium);
        assert_eq!(outlaw.notes, vec!["Adjusted for 30\" arrow length".to_string()]);
    }

    #[test]
    fn test_point_adjustment_alone() {
        // 125 gr: factor +0.05. Outlaw 350 -> round(367.5) = 368
        let recs = get_manufacturer_spine_recommendations(47.0, 125.0, 28.0);
        let outlaw = find(&recs, "Outlaw");
        assert_eq!(outlaw.recommended_spine, 368.0);
        assert_eq!(outlaw.confidence, Confidence::Medium);
        assert_eq!(outlaw.notes, vec!["Adjusted for 125gr point weight".to_string()]);

        // 75 gr is listed too, but no 47 lb bucket admits it
        assert!(get_manufacturer_spine_recommendations(47.0, 75.0, 28.0).is_empty());
    }

    #[test]
    fn test_length_and_point_adjustment_compound() {
        // FMJ 4mm at 55 lb / 125 gr is 300.
        // 29": round(300 * 0.96) = 288, then 125 gr: round(288 * 1.05) = round(302.4) = 302
        let recs = get_manufacturer_spine_recommendations(55.0, 125.0, 29.0);
        let fmj = find(&recs, "FMJ 4mm");
        assert_eq!(fmj.recommended_spine, 302.0);
        assert_eq!(fmj.confidence, Confidence::Medium);
        assert_eq!(
            fmj.notes,
            vec![
                "Adjusted for 29\" arrow length".to_string(),
                "Adjusted for 125gr point weight".to_string(),
            ]
        );
    }

    #[test]
    fn test_unlisted_keys_skip_adjustment() {
        // 29.5" and 110 gr have no factors: chart values pass through untouched
        let recs = get_manufacturer_spine_recommendations(47.0, 110.0, 29.5);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.confidence == Confidence::High && r.notes.is_empty()));
    }

    #[test]
    fn test_point_weight_outside_buckets() {
        // 150 gr is outside every bucket's point weight range
        assert!(get_manufacturer_spine_recommendations(50.0, 150.0, 28.0).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(get_manufacturer_spine_recommendations(10.0, 100.0, 28.0).is_empty());
        assert!(get_manufacturer_spine_recommendations(f64::NAN, 100.0, 28.0).is_empty());
    }

    #[test]
    fn test_light_bow_light_point() {
        // 22 lb / 80 gr only matches X-Impact [20,24] x [75,100]
        let recs = get_manufacturer_spine_recommendations(22.0, 80.0, 28.0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].series, "XImpact");
        assert_eq!(recs[0].recommended_spine, 900.0);
    }

    #[test]
    fn test_idempotent() {
        let first = get_manufacturer_spine_recommendations(52.0, 125.0, 30.0);
        let second = get_manufacturer_spine_recommendations(52.0, 125.0, 30.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_charts_first_bucket_wins() {
        let charts = ManufacturerCharts {
            manufacturers: vec![ManufacturerChart {
                name: "Acme".to_string(),
                series: vec![SeriesChart {
                    key: "overlap".to_string(),
                    buckets: vec![
                        SpineBucket { draw_weight: [40.0, 50.0], point_weight: [90.0, 130.0], spine: 400.0 },
                        SpineBucket { draw_weight: [45.0, 55.0], point_weight: [90.0, 130.0], spine: 340.0 },
                    ],
                }],
            }],
        };
        let recs = match_manufacturer_charts(&charts, &AdjustmentFactors::default(), 48.0, 100.0, 28.0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommended_spine, 400.0);
        assert_eq!(recs[0].series, "Overlap");
    }

    #[test]
    fn test_confidence_serialization() {
        assert_eq!(serde_json::to_string(&Confidence::Medium).unwrap(), "\"medium\"");
    }
}
