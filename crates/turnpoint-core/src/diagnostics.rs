//! Analysis diagnostics: timing and counts for each pipeline stage.
//!
//! [`analyze_with_diagnostics`] runs the same stages as
//! [`analyze`](crate::analyze) and records how long each took and what
//! it produced. Useful for tuning the step and cluster parameters
//! against recorded strokes.
//!
//! Time is read through the [`Clock`] trait so the caller picks the
//! source (e.g. `std::time::Instant` natively, `performance.now()` in a
//! browser). Durations are serialized as fractional seconds (`f64`)
//! since `std::time::Duration` does not implement serde traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cluster::{close_distance, reduce_clusters};
use crate::curve::Curve;
use crate::measure::{ArcLengthMeasure, CurveMeasurer, step_distance};
use crate::region::size_regions;
use crate::sample::sample_path;
use crate::turning::find_turning_points;
use crate::types::{Analysis, AnalysisConfig, AnalysisError, Rect};

/// A monotonic time source.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single analysis run.
///
/// Stages that are skipped by configuration have `None` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDiagnostics {
    /// Arc-length measurement of the whole curve.
    pub measure: StageDiagnostics,
    /// Path sampling (only when `config.sample_line == true`).
    pub sampling: Option<StageDiagnostics>,
    /// Turning point detection.
    pub turning_points: StageDiagnostics,
    /// Cluster reduction (only when `config.reduce_clusters == true`).
    pub cluster_reduction: Option<StageDiagnostics>,
    /// Region sizing.
    pub region_sizing: StageDiagnostics,
    /// Total wall-clock duration of the analysis (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: AnalysisSummary,
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Arc-length measurement metrics.
    Measure {
        /// Path elements in the input curve.
        element_count: usize,
        /// Non-degenerate segments in the measured contour.
        segment_count: usize,
        /// Total arc length.
        length: f64,
    },
    /// Path sampling metrics.
    Sampling {
        /// Arc-length step after the sampler floor.
        step: f64,
        /// Vertices in the sampled polyline.
        vertex_count: usize,
    },
    /// Turning point detection metrics.
    TurningPoints {
        /// Arc-length step of the walk.
        step: f64,
        /// Points recorded, including start and end.
        point_count: usize,
    },
    /// Cluster reduction metrics.
    ClusterReduction {
        /// Distance below which consecutive points cluster.
        close_distance: f64,
        /// Points before reduction.
        points_before: usize,
        /// Points after reduction.
        points_after: usize,
        /// Reduction ratio: `1.0 - (after / before)`.
        reduction_ratio: f64,
    },
    /// Region sizing metrics.
    RegionSizing {
        /// Number of regions sized.
        region_count: usize,
        /// Smallest side length.
        min_side: f64,
        /// Largest side length.
        max_side: f64,
        /// Mean side length.
        mean_side: f64,
    },
}

/// High-level summary for the whole analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Arc length of the curve.
    pub length: f64,
    /// Turning points before reduction.
    pub raw_point_count: usize,
    /// Points the regions were sized around.
    pub point_count: usize,
}

impl AnalysisDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Analysis Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Curve length: {:.3}", self.summary.length));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<24} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);

        let mut stages: Vec<(&str, &StageDiagnostics)> = vec![("Measure", &self.measure)];
        if let Some(ref s) = self.sampling {
            stages.push(("Sampling", s));
        }
        stages.push(("Turning Points", &self.turning_points));
        if let Some(ref c) = self.cluster_reduction {
            stages.push(("Cluster Reduction", c));
        }
        stages.push(("Region Sizing", &self.region_sizing));

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<24} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Raw points: {}  |  Final points: {}",
            self.summary.raw_point_count, self.summary.point_count,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Measure {
            element_count,
            segment_count,
            length,
        } => format!("{element_count} elements, {segment_count} segments, length={length:.2}"),
        StageMetrics::Sampling { step, vertex_count } => {
            format!("step={step:.3} -> {vertex_count} vertices")
        }
        StageMetrics::TurningPoints { step, point_count } => {
            format!("step={step:.4} -> {point_count} pts")
        }
        StageMetrics::ClusterReduction {
            close_distance,
            points_before,
            points_after,
            reduction_ratio,
        } => format!(
            "close={close_distance:.2} {points_before}->{points_after} pts ({:.1}% reduction)",
            reduction_ratio * 100.0,
        ),
        StageMetrics::RegionSizing {
            region_count,
            min_side,
            max_side,
            mean_side,
        } => format!(
            "{region_count} regions (min={min_side:.1} max={max_side:.1} mean={mean_side:.1})"
        ),
    }
}

/// Side length statistics: `(min, max, mean)`, all zero when empty.
fn side_stats(rects: &[Rect]) -> (f64, f64, f64) {
    if rects.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = rects.iter().map(|r| r.side).fold(f64::INFINITY, f64::min);
    let max = rects.iter().map(|r| r.side).fold(f64::NEG_INFINITY, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let mean = rects.iter().map(|r| r.side).sum::<f64>() / rects.len() as f64;
    (min, max, mean)
}

/// Reduction ratio `1 - after / before`; zero for an empty input.
#[allow(clippy::cast_precision_loss)]
fn reduction_ratio(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        1.0 - after as f64 / before as f64
    }
}

/// Run the analysis pipeline, timing every stage with `clock`.
///
/// Produces the same [`Analysis`] as [`analyze`](crate::analyze).
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` fails
/// [`AnalysisConfig::validate`].
pub fn analyze_with_diagnostics<C: Clock>(
    curve: &Curve,
    config: &AnalysisConfig,
    clock: &C,
) -> Result<(Analysis, AnalysisDiagnostics), AnalysisError> {
    config.validate()?;
    let total_start = clock.now();

    // Measure.
    let start = clock.now();
    let measurer = CurveMeasurer::new(curve);
    let length = measurer.length();
    let measure = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Measure {
            element_count: curve.elements().len(),
            segment_count: measurer.segment_count(),
            length,
        },
    };

    // Sampling (optional).
    let (sampled, sampling) = if config.sample_line {
        let start = clock.now();
        let sampled = sample_path(curve, config);
        let diag = StageDiagnostics {
            duration: clock.elapsed(&start),
            metrics: StageMetrics::Sampling {
                step: step_distance(length, config).max(config.min_sample_step),
                vertex_count: sampled.vertices().len(),
            },
        };
        (Some(sampled), Some(diag))
    } else {
        (None, None)
    };

    // Turning points.
    let start = clock.now();
    let raw_points = find_turning_points(curve, config);
    let turning_points = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::TurningPoints {
            step: step_distance(length, config),
            point_count: raw_points.len(),
        },
    };

    // Cluster reduction (optional).
    let (points, cluster_reduction) = if config.reduce_clusters {
        let start = clock.now();
        let reduced = reduce_clusters(&raw_points, length, config);
        let diag = StageDiagnostics {
            duration: clock.elapsed(&start),
            metrics: StageMetrics::ClusterReduction {
                close_distance: close_distance(length, config),
                points_before: raw_points.len(),
                points_after: reduced.len(),
                reduction_ratio: reduction_ratio(raw_points.len(), reduced.len()),
            },
        };
        (reduced, Some(diag))
    } else {
        (raw_points.clone(), None)
    };

    // Region sizing.
    let start = clock.now();
    let rects = size_regions(&points, config);
    let (min_side, max_side, mean_side) = side_stats(&rects);
    let region_sizing = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::RegionSizing {
            region_count: rects.len(),
            min_side,
            max_side,
            mean_side,
        },
    };

    let summary = AnalysisSummary {
        length,
        raw_point_count: raw_points.len(),
        point_count: points.len(),
    };
    let diagnostics = AnalysisDiagnostics {
        measure,
        sampling,
        turning_points,
        cluster_reduction,
        region_sizing,
        total_duration: clock.elapsed(&total_start),
        summary,
    };

    let analysis = Analysis {
        length,
        raw_points,
        points,
        rects,
        sampled,
    };
    Ok((analysis, diagnostics))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use kurbo::BezPath;

    use super::*;
    use crate::types::Point;

    /// Clock that advances one millisecond every time it is read.
    struct TickClock {
        ticks: Cell<u64>,
    }

    impl TickClock {
        fn new() -> Self {
            Self {
                ticks: Cell::new(0),
            }
        }
    }

    impl Clock for TickClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.ticks.get();
            self.ticks.set(t + 1);
            t
        }

        fn elapsed(&self, since: &u64) -> Duration {
            Duration::from_millis(self.now() - since)
        }
    }

    fn s_curve() -> Curve {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((50.0, 100.0), (100.0, 0.0));
        path.quad_to((150.0, -100.0), (200.0, 0.0));
        Curve::new(path)
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        assert!((duration_ms(d) - 1234.0).abs() < 0.01);
    }

    #[test]
    fn reduction_ratio_handles_empty() {
        assert!(reduction_ratio(0, 0).abs() < f64::EPSILON);
        assert!((reduction_ratio(10, 4) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn side_stats_computes() {
        let rects = [
            Rect::new(Point::new(0.0, 0.0), 2.0),
            Rect::new(Point::new(0.0, 0.0), 4.0),
            Rect::new(Point::new(0.0, 0.0), 9.0),
        ];
        let (min, max, mean) = side_stats(&rects);
        assert!((min - 2.0).abs() < f64::EPSILON);
        assert!((max - 9.0).abs() < f64::EPSILON);
        assert!((mean - 5.0).abs() < f64::EPSILON);
        assert_eq!(side_stats(&[]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn diagnostics_match_analysis() {
        let config = AnalysisConfig {
            sample_line: true,
            ..AnalysisConfig::default()
        };
        let (analysis, diag) =
            analyze_with_diagnostics(&s_curve(), &config, &TickClock::new()).unwrap();
        assert_eq!(diag.summary.raw_point_count, analysis.raw_points.len());
        assert_eq!(diag.summary.point_count, analysis.points.len());
        assert!(diag.sampling.is_some());
        assert!(diag.cluster_reduction.is_some());
        assert!(diag.total_duration >= diag.turning_points.duration);
        assert!(analysis.sampled.is_some());
    }

    #[test]
    fn diagnostics_agree_with_plain_analyze() {
        let config = AnalysisConfig::default();
        let (analysis, _) =
            analyze_with_diagnostics(&s_curve(), &config, &TickClock::new()).unwrap();
        assert_eq!(analysis, crate::analyze(&s_curve(), &config).unwrap());
    }

    #[test]
    fn skipped_stages_are_none() {
        let config = AnalysisConfig {
            reduce_clusters: false,
            ..AnalysisConfig::default()
        };
        let (analysis, diag) =
            analyze_with_diagnostics(&s_curve(), &config, &TickClock::new()).unwrap();
        assert!(diag.sampling.is_none());
        assert!(diag.cluster_reduction.is_none());
        assert_eq!(analysis.points, analysis.raw_points);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnalysisConfig {
            min_steps: -1.0,
            ..AnalysisConfig::default()
        };
        let result = analyze_with_diagnostics(&s_curve(), &config, &TickClock::new());
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn report_names_every_stage() {
        let config = AnalysisConfig {
            sample_line: true,
            ..AnalysisConfig::default()
        };
        let (_, diag) = analyze_with_diagnostics(&s_curve(), &config, &TickClock::new()).unwrap();
        let report = diag.report();
        assert!(report.contains("Analysis Diagnostics Report"));
        for stage in [
            "Measure",
            "Sampling",
            "Turning Points",
            "Cluster Reduction",
            "Region Sizing",
        ] {
            assert!(report.contains(stage), "missing {stage} in:\n{report}");
        }
    }

    #[test]
    fn diagnostics_serde_round_trip() {
        let (_, diag) =
            analyze_with_diagnostics(&s_curve(), &AnalysisConfig::default(), &TickClock::new())
                .unwrap();
        let json = serde_json::to_string(&diag).unwrap();
        let back: AnalysisDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.point_count, diag.summary.point_count);
        assert_eq!(back.total_duration, diag.total_duration);
    }
}
