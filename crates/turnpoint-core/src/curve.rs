//! The immutable curve handed to the pipeline once per drawn stroke.
//!
//! A [`Curve`] wraps a [`kurbo::BezPath`]: an ordered sequence of
//! move/line/quadratic (and, for completeness, cubic and close)
//! elements. The pipeline only reads it; every stage that needs
//! arc-length queries builds its own [`CurveMeasurer`](crate::measure::CurveMeasurer)
//! over a shared reference.

use kurbo::{BezPath, PathEl};

use crate::types::Point;

/// An immutable geometric path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve(BezPath);

impl Curve {
    /// Wrap an existing path.
    #[must_use]
    pub const fn new(path: BezPath) -> Self {
        Self(path)
    }

    /// A curve with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self(BezPath::new())
    }

    /// Build a polyline curve through `points`: a move to the first
    /// point followed by straight lines to the rest.
    ///
    /// An empty slice produces an empty curve.
    #[must_use]
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = BezPath::new();
        let mut iter = points.iter();
        if let Some(&first) = iter.next() {
            path.move_to(first);
            for &p in iter {
                path.line_to(p);
            }
        }
        Self(path)
    }

    /// Returns `true` if the curve has no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.elements().is_empty()
    }

    /// The raw path elements.
    #[must_use]
    pub fn elements(&self) -> &[PathEl] {
        self.0.elements()
    }

    /// Borrow the underlying path, e.g. for rendering.
    #[must_use]
    pub const fn as_bez_path(&self) -> &BezPath {
        &self.0
    }

    /// End points of every element, in order.
    ///
    /// For a polyline this is exactly its vertex list. Control points of
    /// curved elements are skipped and close elements contribute nothing.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point> {
        self.0
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p)
                | PathEl::LineTo(p)
                | PathEl::QuadTo(_, p)
                | PathEl::CurveTo(_, _, p) => Some(Point::from(p)),
                PathEl::ClosePath => None,
            })
            .collect()
    }
}

impl From<BezPath> for Curve {
    fn from(path: BezPath) -> Self {
        Self(path)
    }
}

impl From<Curve> for BezPath {
    fn from(curve: Curve) -> Self {
        curve.0
    }
}
