//! Synthetic pointer traces for benchmarking without recorded input.

use std::f64::consts::TAU;

use clap::ValueEnum;
use turnpoint_core::Point;

/// Built-in stroke shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Horizontal straight line.
    Line,
    /// One full sine period.
    SCurve,
    /// Four sharp teeth.
    Zigzag,
    /// Closed circle drawn counter-clockwise from the rightmost point.
    Circle,
    /// Archimedean spiral of three turns.
    Spiral,
}

impl Shape {
    /// Pointer samples for this shape, `count` of them (at least two).
    #[must_use]
    pub fn samples(self, count: usize) -> Vec<Point> {
        let count = count.max(2);
        #[allow(clippy::cast_precision_loss)]
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / last;
                self.at(t)
            })
            .collect()
    }

    /// Position along the shape at parameter `t` in `[0, 1]`.
    fn at(self, t: f64) -> Point {
        match self {
            Self::Line => Point::new(400.0 * t, 0.0),
            Self::SCurve => Point::new(400.0 * t, 100.0 * (TAU * t).sin()),
            Self::Zigzag => {
                // Triangle wave: four teeth, 80 high.
                let phase = (t * 4.0).fract();
                let y = if phase < 0.5 { phase } else { 1.0 - phase };
                Point::new(400.0 * t, 160.0 * y)
            }
            Self::Circle => {
                let a = TAU * t;
                Point::new(150.0f64.mul_add(a.cos(), 200.0), 150.0f64.mul_add(a.sin(), 200.0))
            }
            Self::Spiral => {
                let a = 3.0 * TAU * t;
                let r = 10.0 + 50.0 * a / TAU;
                Point::new(r.mul_add(a.cos(), 200.0), r.mul_add(a.sin(), 200.0))
            }
        }
    }
}
