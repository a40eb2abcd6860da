//! Turning point detection: where does the stroke change direction?
//!
//! The curve is walked at a fixed arc-length step and the tangent at
//! each step is reduced to a [`DirectionSign`], the pair of signs of
//! its x and y components. Every step where either sign flips records
//! a point. The start and end of the curve are always recorded.
//!
//! The step here has no floor (compare [`sample`](crate::sample)), so the
//! walk takes up to [`AnalysisConfig::max_steps`] steps regardless of
//! how long the stroke is. Near sharp corners the tangent can flip back
//! and forth over a few steps, producing bursts of nearly identical
//! points; [`cluster`](crate::cluster) collapses those.

use kurbo::Vec2;

use crate::curve::Curve;
use crate::measure::{ArcLengthMeasure, CurveMeasurer, step_distance};
use crate::types::{AnalysisConfig, Point};

/// Sign of a single tangent component: `+1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly positive component.
    Positive,
    /// Zero or negative component.
    Negative,
}

impl Sign {
    /// Sign of `value`. Zero (and NaN) map to [`Negative`](Self::Negative).
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// Quadrant of travel: the signs of a tangent's x and y components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionSign {
    /// Sign of the horizontal component.
    pub x: Sign,
    /// Sign of the vertical component.
    pub y: Sign,
}

impl DirectionSign {
    /// Direction sign of a tangent vector.
    #[must_use]
    pub fn from_tangent(tangent: Vec2) -> Self {
        Self {
            x: Sign::of(tangent.x),
            y: Sign::of(tangent.y),
        }
    }
}

/// Find the turning points of `curve`, in traversal order.
///
/// Returns an empty vector for an empty or degenerate curve. Otherwise
/// the first element is the curve's start, the last its end, and each
/// element in between is the position at a walk step where the tangent's
/// [`DirectionSign`] differs from the previous step's.
///
/// A straight line therefore yields exactly its two end points:
///
/// ```
/// use turnpoint_core::{AnalysisConfig, Curve, Point};
/// use turnpoint_core::turning::find_turning_points;
///
/// let curve = Curve::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
/// let points = find_turning_points(&curve, &AnalysisConfig::default());
/// assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
/// ```
#[must_use = "returns the turning points"]
pub fn find_turning_points(curve: &Curve, config: &AnalysisConfig) -> Vec<Point> {
    if curve.is_empty() {
        return Vec::new();
    }
    let measurer = CurveMeasurer::new(curve);
    turning_points_with(&measurer, config)
}

/// Walk any [`ArcLengthMeasure`] and collect its turning points.
pub(crate) fn turning_points_with<M: ArcLengthMeasure>(
    measurer: &M,
    config: &AnalysisConfig,
) -> Vec<Point> {
    let length = measurer.length();
    let step = step_distance(length, config);

    let Some(initial_tangent) = measurer.tangent_at(0.0) else {
        return Vec::new();
    };
    let Some(start) = measurer.position_at(0.0) else {
        return Vec::new();
    };

    let mut direction = DirectionSign::from_tangent(initial_tangent);
    let mut output = vec![start];

    // A non-positive or NaN step would never reach the end.
    if step > 0.0 {
        let mut distance = 0.0;
        while distance < length {
            distance += step;
            let Some(tangent) = measurer.tangent_at(distance) else {
                continue;
            };
            let next = DirectionSign::from_tangent(tangent);
            if next != direction
                && let Some(p) = measurer.position_at(distance)
            {
                output.push(p);
            }
            direction = next;
        }
    }

    if let Some(end) = measurer.position_at(length) {
        output.push(end);
    }
    tracing::debug!(length, step, points = output.len(), "found turning points");
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kurbo::BezPath;

    use super::*;

    fn default_config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    /// Measurer over a straight horizontal walk whose tangent is scripted
    /// per arc-length interval.
    struct ScriptedMeasurer {
        length: f64,
        /// `(until_distance, tangent)` in increasing distance order.
        tangents: Vec<(f64, Vec2)>,
    }

    impl ArcLengthMeasure for ScriptedMeasurer {
        fn length(&self) -> f64 {
            self.length
        }

        fn position_at(&self, distance: f64) -> Option<Point> {
            Some(Point::new(distance.clamp(0.0, self.length), 0.0))
        }

        fn tangent_at(&self, distance: f64) -> Option<Vec2> {
            let d = distance.clamp(0.0, self.length);
            self.tangents
                .iter()
                .find(|(until, _)| d <= *until)
                .map(|&(_, t)| t)
        }
    }

    struct DegenerateMeasurer;

    impl ArcLengthMeasure for DegenerateMeasurer {
        fn length(&self) -> f64 {
            0.0
        }

        fn position_at(&self, _distance: f64) -> Option<Point> {
            None
        }

        fn tangent_at(&self, _distance: f64) -> Option<Vec2> {
            None
        }
    }

    // --- Sign tests ---

    #[test]
    fn zero_maps_to_negative() {
        assert_eq!(Sign::of(0.0), Sign::Negative);
        assert_eq!(Sign::of(-0.0), Sign::Negative);
        assert_eq!(Sign::of(1e-300), Sign::Positive);
        assert_eq!(Sign::of(-5.0), Sign::Negative);
        assert_eq!(Sign::of(5.0), Sign::Positive);
    }

    #[test]
    fn direction_from_tangent() {
        let d = DirectionSign::from_tangent(Vec2::new(3.0, 0.0));
        assert_eq!(d.x, Sign::Positive);
        assert_eq!(d.y, Sign::Negative);
    }

    // --- Detector on scripted measurers ---

    #[test]
    fn degenerate_measurer_yields_nothing() {
        assert!(turning_points_with(&DegenerateMeasurer, &default_config()).is_empty());
    }

    #[test]
    fn constant_direction_yields_endpoints() {
        let m = ScriptedMeasurer {
            length: 10.0,
            tangents: vec![(10.0, Vec2::new(1.0, 1.0))],
        };
        let points = turning_points_with(&m, &default_config());
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[test]
    fn each_flip_records_one_point() {
        // Flip y sign past 4.005, flip x sign past 7.005.
        let m = ScriptedMeasurer {
            length: 10.0,
            tangents: vec![
                (4.005, Vec2::new(1.0, 1.0)),
                (7.005, Vec2::new(1.0, -1.0)),
                (10.0, Vec2::new(-1.0, -1.0)),
            ],
        };
        let points = turning_points_with(&m, &default_config());
        assert_eq!(points.len(), 4, "got {points:?}");
        // Step is 0.01: the first sample past each boundary is recorded.
        assert!((points[1].x - 4.01).abs() < 1e-6, "got {points:?}");
        assert!((points[2].x - 7.01).abs() < 1e-6, "got {points:?}");
        assert_eq!(points[3], Point::new(10.0, 0.0));
    }

    #[test]
    fn sign_is_tracked_even_when_flipping_back() {
        // +y, -y, +y: two flips, two interior points.
        let m = ScriptedMeasurer {
            length: 10.0,
            tangents: vec![
                (3.0, Vec2::new(1.0, 1.0)),
                (6.0, Vec2::new(1.0, -1.0)),
                (10.0, Vec2::new(1.0, 1.0)),
            ],
        };
        let points = turning_points_with(&m, &default_config());
        assert_eq!(points.len(), 4, "got {points:?}");
    }

    // --- Detector on real curves ---

    #[test]
    fn empty_curve_yields_nothing() {
        assert!(find_turning_points(&Curve::empty(), &default_config()).is_empty());
    }

    #[test]
    fn zero_length_curve_yields_nothing() {
        let curve = Curve::polyline(&[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]);
        assert!(find_turning_points(&curve, &default_config()).is_empty());
    }

    #[test]
    fn straight_line_yields_two_points() {
        let curve = Curve::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        let points = find_turning_points(&curve, &default_config());
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn right_angle_records_corner() {
        let curve = Curve::polyline(&[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, -100.0),
        ]);
        let points = find_turning_points(&curve, &default_config());
        // (+x, 0y) -> (0x, -y): x sign flips once, just past the corner.
        assert_eq!(points.len(), 3, "got {points:?}");
        assert!(points[1].distance(Point::new(100.0, 0.0)) < 1.0);
    }

    #[test]
    fn s_curve_has_two_reversals() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((50.0, 100.0), (100.0, 0.0));
        path.quad_to((150.0, -100.0), (200.0, 0.0));
        let points = find_turning_points(&Curve::new(path), &default_config());
        assert!(points.len() >= 4, "got {points:?}");
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(*points.last().unwrap(), Point::new(200.0, 0.0));
    }

    #[test]
    fn detection_is_idempotent() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((40.0, 90.0), (80.0, 10.0));
        path.quad_to((120.0, -70.0), (160.0, 30.0));
        let curve = Curve::new(path);
        assert_eq!(
            find_turning_points(&curve, &default_config()),
            find_turning_points(&curve, &default_config()),
        );
    }
}
