//! Adaptive region sizing: one square region of interest per point.
//!
//! Each square is centered on its point and sized by the Chebyshev edge
//! to the nearer of its two neighbors, so densely packed points (tight
//! turns) get small squares and isolated points get large ones.

use crate::types::{AnalysisConfig, Point, Rect};

/// Side length for `point` given its optional neighbors.
///
/// - No neighbors: `default_side`.
/// - Otherwise the nearer neighbor by Euclidean distance (a missing
///   neighbor counts as infinitely far) decides, and the side is the
///   Chebyshev edge `max(|dx|, |dy|)` to it.
/// - Both neighbors exactly equidistant: their common Chebyshev edge
///   if they agree on it (e.g. evenly spaced collinear points), else
///   `default_side`.
#[must_use]
pub fn region_side(
    prev: Option<Point>,
    point: Point,
    next: Option<Point>,
    default_side: f64,
) -> f64 {
    if prev.is_none() && next.is_none() {
        return default_side;
    }

    let d1 = prev.map_or(f64::INFINITY, |p| p.distance(point));
    let d2 = next.map_or(f64::INFINITY, |n| n.distance(point));

    match (prev, next) {
        (Some(p), _) if d1 < d2 => point.chebyshev_distance(p),
        (_, Some(n)) if d2 < d1 => point.chebyshev_distance(n),
        (Some(p), Some(n)) => {
            // Equidistant neighbors only decide when they agree.
            let (e1, e2) = (point.chebyshev_distance(p), point.chebyshev_distance(n));
            #[allow(clippy::float_cmp)]
            let agree = e1 == e2;
            if agree { e1 } else { default_side }
        }
        _ => default_side,
    }
}

/// Size a square region around every point in `points`.
///
/// The result is parallel to the input: `rects[i]` is centered on
/// `points[i]`.
///
/// # Examples
///
/// ```
/// use turnpoint_core::{AnalysisConfig, Point};
/// use turnpoint_core::region::size_regions;
///
/// let points = [Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(100.0, 0.0)];
/// let rects = size_regions(&points, &AnalysisConfig::default());
/// assert_eq!(rects.len(), 3);
/// // The middle point is 30 from its previous neighbor and 70 from its next.
/// assert!((rects[1].side - 30.0).abs() < 1e-12);
/// ```
#[must_use = "returns the sized regions"]
pub fn size_regions(points: &[Point], config: &AnalysisConfig) -> Vec<Rect> {
    points
        .iter()
        .enumerate()
        .map(|(i, &point)| {
            let prev = i.checked_sub(1).and_then(|j| points.get(j)).copied();
            let next = points.get(i + 1).copied();
            let side = region_side(prev, point, next, config.default_rect_side);
            Rect::new(point, side)
        })
        .collect()
}
