//! Lines handed to the renderer: the stroke the user drew, or a line
//! derived from it by sampling.

use kurbo::{Cap, Join};

use crate::curve::Curve;
use crate::sample::sample_path;
use crate::types::AnalysisConfig;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; `0xFF` is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0x00, 0xFF, 0xFF);

    /// Opaque color from its components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// How a line is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Stroke color.
    pub color: Color,
    /// Shape of the stroke's open ends.
    pub cap: Cap,
    /// Shape of corners between segments.
    pub join: Join,
    /// Clear pixels under the line instead of painting it.
    pub erase: bool,
}

impl LineStyle {
    /// Style for strokes the user draws.
    pub const DRAWN: Self = Self {
        stroke_width: 10.0,
        color: Color::BLACK,
        cap: Cap::Round,
        join: Join::Round,
        erase: false,
    };

    /// Style for sampled lines: thin and cyan so they stand out on top
    /// of the drawn stroke.
    pub const SAMPLED: Self = Self {
        stroke_width: 5.0,
        color: Color::CYAN,
        ..Self::DRAWN
    };
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::DRAWN
    }
}

/// A line to render, tagged by where its curve came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A stroke drawn by the user.
    Drawn { curve: Curve, style: LineStyle },
    /// A polyline sampled from a drawn stroke.
    Sampled { curve: Curve, style: LineStyle },
}

impl Line {
    /// A drawn line with the default drawn style.
    #[must_use]
    pub const fn drawn(curve: Curve) -> Self {
        Self::Drawn {
            curve,
            style: LineStyle::DRAWN,
        }
    }

    /// Sample `curve` and wrap the result as a [`Line::Sampled`].
    #[must_use]
    pub fn sampled_from(curve: &Curve, config: &AnalysisConfig) -> Self {
        Self::Sampled {
            curve: sample_path(curve, config),
            style: LineStyle::SAMPLED,
        }
    }

    /// The line's curve.
    #[must_use]
    pub const fn curve(&self) -> &Curve {
        match self {
            Self::Drawn { curve, .. } | Self::Sampled { curve, .. } => curve,
        }
    }

    /// The line's style.
    #[must_use]
    pub const fn style(&self) -> &LineStyle {
        match self {
            Self::Drawn { style, .. } | Self::Sampled { style, .. } => style,
        }
    }

    /// Returns `true` for a line with no path elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curve().is_empty()
    }
}
