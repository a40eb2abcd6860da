//! Shared types for the turnpoint curve analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downwards on most canvases).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Chebyshev edge size: the longer of the two axis-aligned legs
    /// between `self` and `other`.
    ///
    /// ```text
    ///                      * other
    ///                      |
    ///                      | |dy|
    ///                      |
    ///    *-----------------*
    ///   self     |dx|
    /// ```
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> f64 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(f64::midpoint(self.x, other.x), f64::midpoint(self.y, other.y))
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// An axis-aligned square region of interest.
///
/// Described by its center and side length; the edges sit at
/// `center ± side / 2` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center of the square.
    pub center: Point,
    /// Side length of the square.
    pub side: f64,
}

impl Rect {
    /// Create a square centered on `center`.
    #[must_use]
    pub const fn new(center: Point, side: f64) -> Self {
        Self { center, side }
    }

    /// Half of the side length.
    #[must_use]
    pub fn half_side(&self) -> f64 {
        self.side / 2.0
    }

    /// Left edge (minimum x).
    #[must_use]
    pub fn left(&self) -> f64 {
        self.center.x - self.half_side()
    }

    /// Top edge (minimum y).
    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.y - self.half_side()
    }

    /// Right edge (maximum x).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.center.x + self.half_side()
    }

    /// Bottom edge (maximum y).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.half_side()
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(r.left(), r.top(), r.right(), r.bottom())
    }
}

/// Configuration for the curve analysis pipeline.
///
/// Defaults reproduce the behavior of the drawing canvas this pipeline
/// was built for. Use [`validate`](Self::validate) (or
/// [`analyze`](crate::analyze), which validates) before running the
/// individual stages with hand-built values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Multiplier applied to the curve length before clamping it into
    /// `[min_steps, max_steps]` to obtain the number of walk steps.
    pub step_scale: f64,

    /// Lower clamp for the number of walk steps.
    pub min_steps: f64,

    /// Upper clamp for the number of walk steps.
    pub max_steps: f64,

    /// Minimum arc-length step used by the path sampler. The turning
    /// point detector deliberately ignores this floor.
    pub min_sample_step: f64,

    /// Points closer than `length / cluster_divisor` are considered part
    /// of the same cluster.
    pub cluster_divisor: f64,

    /// Side of a region of interest when neither neighbor decides it
    /// (single point, or both neighbors exactly equidistant).
    pub default_rect_side: f64,

    /// Whether regions are sized around the cluster-reduced points
    /// (`true`) or the raw turning points (`false`).
    pub reduce_clusters: bool,

    /// Whether [`analyze`](crate::analyze) also produces the sampled
    /// (simplified) line.
    pub sample_line: bool,
}

impl AnalysisConfig {
    /// Default length multiplier for the step count.
    pub const DEFAULT_STEP_SCALE: f64 = 1000.0;

    /// Default lower clamp for the step count.
    pub const DEFAULT_MIN_STEPS: f64 = 10.0;

    /// Default upper clamp for the step count.
    pub const DEFAULT_MAX_STEPS: f64 = 1000.0;

    /// Default sampler step floor.
    pub const DEFAULT_MIN_SAMPLE_STEP: f64 = 150.0;

    /// Default cluster distance divisor.
    pub const DEFAULT_CLUSTER_DIVISOR: f64 = 10.0;

    /// Default region side length.
    pub const DEFAULT_RECT_SIDE: f64 = 200.0;

    /// Check the numeric invariants of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] naming the first field
    /// that is non-finite or out of range, or when `min_steps` exceeds
    /// `max_steps`.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let positive = [
            ("step_scale", self.step_scale),
            ("min_steps", self.min_steps),
            ("max_steps", self.max_steps),
            ("cluster_divisor", self.cluster_divisor),
            ("default_rect_side", self.default_rect_side),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.min_sample_step.is_finite() || self.min_sample_step < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_sample_step must be finite and non-negative, got {}",
                self.min_sample_step
            )));
        }
        if self.min_steps > self.max_steps {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_steps ({}) exceeds max_steps ({})",
                self.min_steps, self.max_steps
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            step_scale: Self::DEFAULT_STEP_SCALE,
            min_steps: Self::DEFAULT_MIN_STEPS,
            max_steps: Self::DEFAULT_MAX_STEPS,
            min_sample_step: Self::DEFAULT_MIN_SAMPLE_STEP,
            cluster_divisor: Self::DEFAULT_CLUSTER_DIVISOR,
            default_rect_side: Self::DEFAULT_RECT_SIDE,
            reduce_clusters: true,
            sample_line: false,
        }
    }
}

/// Result of analyzing one completed curve.
///
/// `points` and `rects` are parallel: `rects[i]` is the region of
/// interest around `points[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Arc length of the measured curve.
    pub length: f64,
    /// Turning points in traversal order, before cluster reduction.
    pub raw_points: Vec<Point>,
    /// Points the regions were sized around (reduced or raw, per
    /// [`AnalysisConfig::reduce_clusters`]).
    pub points: Vec<Point>,
    /// One square per entry of `points`.
    pub rects: Vec<Rect>,
    /// Simplified polyline, when [`AnalysisConfig::sample_line`] is set.
    pub sampled: Option<Curve>,
}

impl Analysis {
    /// Returns `true` if no points were found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Errors that can occur while setting up an analysis.
///
/// Degenerate curves are not errors; they produce empty results.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Analysis configuration is invalid.
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}
