//! Path sampling: approximate a curve by a polyline of fixed arc-length steps.
//!
//! The sampled line is only used for display next to the drawn stroke.
//! Unlike [`turning`](crate::turning), the sampler puts a floor under the
//! step distance ([`AnalysisConfig::min_sample_step`]), so long strokes
//! are reduced to a handful of straight segments.

use kurbo::BezPath;

use crate::curve::Curve;
use crate::measure::{ArcLengthMeasure, CurveMeasurer, step_distance};
use crate::types::AnalysisConfig;

/// Resample `curve` into a polyline.
///
/// Returns `curve` unchanged (by clone) when it is empty or degenerate.
/// Otherwise the result starts at the curve's start point, visits the
/// point at every multiple of the step distance short of the curve
/// length, and ends exactly at the curve's end point.
///
/// # Examples
///
/// ```
/// use turnpoint_core::{AnalysisConfig, Curve, Point};
/// use turnpoint_core::sample::sample_path;
///
/// let curve = Curve::polyline(&[Point::new(0.0, 0.0), Point::new(1000.0, 0.0)]);
/// let sampled = sample_path(&curve, &AnalysisConfig::default());
/// let vertices = sampled.vertices();
/// assert_eq!(vertices.first(), Some(&Point::new(0.0, 0.0)));
/// assert_eq!(vertices.last(), Some(&Point::new(1000.0, 0.0)));
/// ```
#[must_use = "returns the sampled curve"]
pub fn sample_path(curve: &Curve, config: &AnalysisConfig) -> Curve {
    if curve.is_empty() {
        return curve.clone();
    }
    let measurer = CurveMeasurer::new(curve);
    sample_with(&measurer, config).unwrap_or_else(|| curve.clone())
}

/// Sample any [`ArcLengthMeasure`]. `None` when its start position is
/// unspecified.
pub(crate) fn sample_with<M: ArcLengthMeasure>(
    measurer: &M,
    config: &AnalysisConfig,
) -> Option<Curve> {
    let length = measurer.length();
    let step = step_distance(length, config).max(config.min_sample_step);

    let start = measurer.position_at(0.0)?;
    let mut output = BezPath::new();
    output.move_to(start);

    // A non-positive step would never reach the end.
    if step > 0.0 {
        let mut distance = 0.0;
        while distance < length {
            if let Some(p) = measurer.position_at(distance) {
                output.line_to(p);
            }
            distance += step;
        }
    }

    if let Some(end) = measurer.position_at(length) {
        output.line_to(end);
    }
    tracing::debug!(length, step, elements = output.elements().len(), "sampled path");

    Some(Curve::new(output))
}
