//! Arc-length measurement over a [`Curve`].
//!
//! This module defines the [`ArcLengthMeasure`] trait used by the sampler
//! and the turning point detector, and [`CurveMeasurer`], the measurer
//! built fresh from a curve for every call.
//!
//! # Per-call measurers
//!
//! A measurer owns its segment table and never changes after
//! construction, so two stages (or two threads) each build their own
//! over the same `&Curve` with no coordination.

use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathEl, PathSeg, Vec2};

use crate::curve::Curve;
use crate::types::{AnalysisConfig, Point};

/// Accuracy passed to kurbo's arc-length routines.
pub const ARCLEN_ACCURACY: f64 = 1e-6;

/// Arc-length queries over a curve.
///
/// Both queries return `None` (the "unspecified" result) when the curve
/// is degenerate: no segments, or zero total length. Callers must check
/// for it rather than assume a point exists.
pub trait ArcLengthMeasure {
    /// Total arc length (always `>= 0`).
    fn length(&self) -> f64;

    /// Point at `distance` along the curve, clamped to `[0, length]`.
    fn position_at(&self, distance: f64) -> Option<Point>;

    /// Direction of travel at `distance`, clamped to `[0, length]`.
    ///
    /// The vector is not normalized.
    fn tangent_at(&self, distance: f64) -> Option<Vec2>;
}

/// One measured segment of the curve.
#[derive(Debug, Clone, Copy)]
struct MeasuredSegment {
    seg: PathSeg,
    /// Arc length at which the segment starts.
    start: f64,
    /// Arc length of the segment alone.
    length: f64,
}

impl MeasuredSegment {
    fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Curve parameter for an arc length measured from the segment start.
    fn param_at(&self, local: f64) -> f64 {
        if local <= 0.0 {
            0.0
        } else if local >= self.length {
            1.0
        } else {
            self.seg.inv_arclen(local, ARCLEN_ACCURACY).clamp(0.0, 1.0)
        }
    }

    /// Point at parameter `t`; the stored endpoints at `t = 0` and `t = 1`.
    fn point(&self, t: f64) -> kurbo::Point {
        if t <= 0.0 {
            self.seg.start()
        } else if t >= 1.0 {
            self.seg.end()
        } else {
            self.seg.eval(t)
        }
    }

    /// Analytic derivative at `t`, falling back to the chord where it
    /// vanishes (a control point sitting on an endpoint).
    fn tangent(&self, t: f64) -> Vec2 {
        let deriv = match self.seg {
            PathSeg::Line(line) => line.p1 - line.p0,
            PathSeg::Quad(quad) => quad.deriv().eval(t).to_vec2(),
            PathSeg::Cubic(cubic) => cubic.deriv().eval(t).to_vec2(),
        };
        if deriv.hypot2() > 0.0 {
            deriv
        } else {
            self.seg.end() - self.seg.start()
        }
    }
}

/// Arc-length measurer over the first contour of a [`Curve`].
///
/// Only the first subpath is measured: elements after a second
/// `MoveTo` are ignored. Zero-length segments are dropped.
#[derive(Debug, Clone)]
pub struct CurveMeasurer {
    segments: Vec<MeasuredSegment>,
    length: f64,
}

impl CurveMeasurer {
    /// Measure `curve`.
    #[must_use]
    pub fn new(curve: &Curve) -> Self {
        let mut seen_move = false;
        let first_contour = curve.elements().iter().copied().take_while(|el| {
            if matches!(el, PathEl::MoveTo(_)) {
                if seen_move {
                    return false;
                }
                seen_move = true;
            }
            true
        });

        let mut segments = Vec::new();
        let mut length = 0.0;
        for seg in kurbo::segments(first_contour) {
            let seg_length = seg.arclen(ARCLEN_ACCURACY);
            if seg_length.is_finite() && seg_length > 0.0 {
                segments.push(MeasuredSegment {
                    seg,
                    start: length,
                    length: seg_length,
                });
                length += seg_length;
            }
        }

        Self { segments, length }
    }

    /// Number of non-degenerate segments measured.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Locate the segment containing `distance` and the curve parameter
    /// within it. `None` when the curve is degenerate.
    fn locate(&self, distance: f64) -> Option<(&MeasuredSegment, f64)> {
        if self.segments.is_empty() || self.length <= 0.0 {
            return None;
        }
        let d = if distance.is_nan() { 0.0 } else { distance };
        // Exact ends: `d - start` on the last segment can fall just short
        // of its length after cancellation.
        if d <= 0.0 {
            return self.segments.first().map(|s| (s, 0.0));
        }
        if d >= self.length {
            return self.segments.last().map(|s| (s, 1.0));
        }
        let idx = self
            .segments
            .partition_point(|s| s.end() < d)
            .min(self.segments.len() - 1);
        let segment = &self.segments[idx];
        let t = segment.param_at(d - segment.start);
        Some((segment, t))
    }
}

impl ArcLengthMeasure for CurveMeasurer {
    fn length(&self) -> f64 {
        self.length
    }

    fn position_at(&self, distance: f64) -> Option<Point> {
        self.locate(distance)
            .map(|(segment, t)| Point::from(segment.point(t)))
    }

    fn tangent_at(&self, distance: f64) -> Option<Vec2> {
        self.locate(distance).map(|(segment, t)| segment.tangent(t))
    }
}

/// Arc-length step for walking a curve of `length`.
///
/// `length / clamp(length * step_scale, min_steps, max_steps)`: short
/// curves get at least `min_steps` steps, long ones at most `max_steps`.
/// Strictly positive for any positive `length` and valid config.
#[must_use]
pub fn step_distance(length: f64, config: &AnalysisConfig) -> f64 {
    let steps = (length * config.step_scale)
        .max(config.min_steps)
        .min(config.max_steps);
    length / steps
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kurbo::BezPath;

    use super::*;

    const EPS: f64 = 1e-6;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
        Curve::polyline(&[Point::new(x0, y0), Point::new(x1, y1)])
    }

    #[test]
    fn ends_are_exact_on_multi_segment_curve() {
        let curve = Curve::polyline(&[
            Point::new(0.0, 0.0),
            Point::new(333.3, 10.0),
            Point::new(123.0, 456.7),
        ]);
        let m = CurveMeasurer::new(&curve);
        assert_eq!(m.position_at(m.length()).unwrap(), Point::new(123.0, 456.7));
        assert_eq!(m.position_at(m.length() + 1.0).unwrap(), Point::new(123.0, 456.7));
        assert_eq!(m.position_at(0.0).unwrap(), Point::new(0.0, 0.0));
        assert_eq!(m.position_at(f64::NAN).unwrap(), Point::new(0.0, 0.0));
        // Tangent at the end belongs to the last segment.
        let t = m.tangent_at(m.length()).unwrap();
        assert!((t.x - (123.0 - 333.3)).abs() < 1e-9);
        assert!((t.y - (456.7 - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn line_length() {
        let m = CurveMeasurer::new(&line(0.0, 0.0, 3.0, 4.0));
        assert!((m.length() - 5.0).abs() < EPS);
        assert_eq!(m.segment_count(), 1);
    }

    #[test]
    fn empty_curve_is_degenerate() {
        let m = CurveMeasurer::new(&Curve::empty());
        assert!(m.length().abs() < f64::EPSILON);
        assert!(m.position_at(0.0).is_none());
        assert!(m.tangent_at(0.0).is_none());
    }

    #[test]
    fn zero_length_curve_is_degenerate() {
        let m = CurveMeasurer::new(&line(5.0, 5.0, 5.0, 5.0));
        assert_eq!(m.segment_count(), 0);
        assert!(m.position_at(0.0).is_none());
        assert!(m.tangent_at(1.0).is_none());
    }

    #[test]
    fn move_only_curve_is_degenerate() {
        let mut path = BezPath::new();
        path.move_to((1.0, 1.0));
        let m = CurveMeasurer::new(&Curve::new(path));
        assert!(m.position_at(0.0).is_none());
    }

    #[test]
    fn position_along_line() {
        let m = CurveMeasurer::new(&line(0.0, 0.0, 100.0, 0.0));
        let p = m.position_at(25.0).unwrap();
        assert!((p.x - 25.0).abs() < EPS);
        assert!(p.y.abs() < EPS);
    }

    #[test]
    fn position_clamps_out_of_range() {
        let m = CurveMeasurer::new(&line(0.0, 0.0, 100.0, 0.0));
        assert_eq!(m.position_at(-10.0).unwrap(), Point::new(0.0, 0.0));
        assert_eq!(m.position_at(1e9).unwrap(), Point::new(100.0, 0.0));
    }

    #[test]
    fn endpoints_are_exact() {
        let m = CurveMeasurer::new(&Curve::polyline(&[
            Point::new(1.0, 2.0),
            Point::new(4.0, 6.0),
            Point::new(4.0, 16.0),
        ]));
        assert_eq!(m.position_at(0.0).unwrap(), Point::new(1.0, 2.0));
        assert_eq!(m.position_at(m.length()).unwrap(), Point::new(4.0, 16.0));
    }

    #[test]
    fn position_crosses_segment_boundary() {
        // (0,0)->(10,0)->(10,10): distance 15 lands halfway up the second leg.
        let m = CurveMeasurer::new(&Curve::polyline(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]));
        let p = m.position_at(15.0).unwrap();
        assert!((p.x - 10.0).abs() < EPS);
        assert!((p.y - 5.0).abs() < EPS);
        let t = m.tangent_at(15.0).unwrap();
        assert!(t.x.abs() < EPS);
        assert!(t.y > 0.0);
    }

    #[test]
    fn tangent_of_line_points_along_it() {
        let m = CurveMeasurer::new(&line(10.0, 10.0, 0.0, 20.0));
        let t = m.tangent_at(3.0).unwrap();
        assert!(t.x < 0.0);
        assert!(t.y > 0.0);
    }

    #[test]
    fn quad_midpoint_by_symmetry() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((50.0, 100.0), (100.0, 0.0));
        let m = CurveMeasurer::new(&Curve::new(path));
        let p = m.position_at(m.length() / 2.0).unwrap();
        assert!((p.x - 50.0).abs() < 1e-3, "got {p:?}");
        assert!((p.y - 50.0).abs() < 1e-3, "got {p:?}");
        let t = m.tangent_at(m.length() / 2.0).unwrap();
        assert!(t.y.abs() < 1e-2, "apex tangent should be horizontal, got {t:?}");
    }

    #[test]
    fn degenerate_quad_tangent_falls_back_to_chord() {
        // Control point equals the start point: the derivative vanishes at t = 0.
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((0.0, 0.0), (10.0, 0.0));
        let m = CurveMeasurer::new(&Curve::new(path));
        let t = m.tangent_at(0.0).unwrap();
        assert!(t.x > 0.0);
        assert!(t.y.abs() < f64::EPSILON);
    }

    #[test]
    fn only_first_contour_is_measured() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.move_to((100.0, 100.0));
        path.line_to((200.0, 100.0));
        let m = CurveMeasurer::new(&Curve::new(path));
        assert!((m.length() - 10.0).abs() < EPS);
        assert_eq!(m.position_at(1e9).unwrap(), Point::new(10.0, 0.0));
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let m = CurveMeasurer::new(&Curve::polyline(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
        ]));
        assert_eq!(m.segment_count(), 1);
        assert!((m.length() - 10.0).abs() < EPS);
    }

    #[test]
    fn queries_are_deterministic() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((30.0, 80.0), (60.0, 10.0));
        path.quad_to((90.0, -60.0), (120.0, 40.0));
        let curve = Curve::new(path);
        let a = CurveMeasurer::new(&curve);
        let b = CurveMeasurer::new(&curve);
        for i in 0..20 {
            let d = f64::from(i) * a.length() / 19.0;
            assert_eq!(a.position_at(d), b.position_at(d));
            assert_eq!(a.tangent_at(d), b.tangent_at(d));
        }
    }

    #[test]
    fn step_distance_long_curve_uses_max_steps() {
        let config = AnalysisConfig::default();
        assert!((step_distance(500.0, &config) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn step_distance_tiny_curve_uses_min_steps() {
        // 0.005 * 1000 = 5 steps, clamped up to 10.
        let config = AnalysisConfig::default();
        assert!((step_distance(0.005, &config) - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn step_distance_mid_range_is_scale_reciprocal() {
        // 0.5 * 1000 = 500 steps, within range: step = 1 / step_scale.
        let config = AnalysisConfig::default();
        assert!((step_distance(0.5, &config) - 0.001).abs() < 1e-12);
    }
}
