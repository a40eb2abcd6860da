//! Stroke building: turn the pointer positions of one press-to-release
//! cycle into a [`Curve`].
//!
//! The gesture layer reports a press, a series of drag positions and a
//! release. Each drag adds a quadratic segment that uses the previous
//! position as its control point and ends halfway to the new position,
//! which smooths the raw samples without fitting anything. The release
//! adds a straight line to the final position.
//!
//! Input devices are not handled here; callers feed positions in.

use kurbo::BezPath;

use crate::curve::Curve;
use crate::types::Point;

/// Accumulates one stroke between press and release.
#[derive(Debug, Clone)]
#[must_use = "a stroke does nothing until released into a Curve"]
pub struct StrokeBuilder {
    path: BezPath,
    previous: Point,
}

impl StrokeBuilder {
    /// Start a stroke at the press position.
    pub fn press(at: Point) -> Self {
        let mut path = BezPath::new();
        path.move_to(at);
        Self { path, previous: at }
    }

    /// Extend the stroke to a new drag position.
    pub fn drag_to(&mut self, to: Point) {
        let mid = self.previous.midpoint(to);
        self.path.quad_to(self.previous, mid);
        self.previous = to;
    }

    /// The last position seen (press or drag).
    #[must_use]
    pub const fn last_position(&self) -> Point {
        self.previous
    }

    /// Finish the stroke with a straight line to the release position.
    #[must_use]
    pub fn release(mut self, at: Point) -> Curve {
        self.path.line_to(at);
        Curve::new(self.path)
    }

    /// Build a stroke from a full list of pointer samples: press at the
    /// first, drag through the rest, release at the last.
    ///
    /// An empty slice yields an empty curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use turnpoint_core::{Point, StrokeBuilder};
    ///
    /// let curve = StrokeBuilder::from_samples(&[
    ///     Point::new(0.0, 0.0),
    ///     Point::new(10.0, 0.0),
    ///     Point::new(20.0, 0.0),
    /// ]);
    /// // move, two quads, release line.
    /// assert_eq!(curve.elements().len(), 4);
    /// ```
    #[must_use]
    pub fn from_samples(samples: &[Point]) -> Curve {
        let Some((&first, rest)) = samples.split_first() else {
            return Curve::empty();
        };
        let mut stroke = Self::press(first);
        for &p in rest {
            stroke.drag_to(p);
        }
        let last = stroke.last_position();
        stroke.release(last)
    }
}
