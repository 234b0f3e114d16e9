//! Core types for rendering: style, placement and placed geometry

use glam::DVec2;

use crate::color::{Paint, Rgb};
use crate::matrix::Matrix;
use crate::types::BBox;

use super::defaults;

/// Paint properties shared by every shape kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Paint,
    /// Stroke width in pixels. Truncated to whole pixels when painting.
    pub stroke_width: f64,
    /// 0.0 (invisible, paints background) to 1.0 (opaque).
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::Color(defaults::FILL),
            stroke: Paint::None,
            stroke_width: defaults::STROKE_WIDTH,
            opacity: defaults::OPACITY,
        }
    }
}

impl Style {
    /// Lines have no interior; they are drawn with the stroke.
    pub fn line() -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::Color(defaults::LINE_STROKE),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Paint>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Colors with opacity applied and the stroke width in whole pixels.
    pub fn resolve(&self) -> ResolvedStyle {
        let opacity = if self.opacity.is_nan() {
            crate::log::warn!("NaN opacity treated as opaque");
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        };
        // A zero width still draws a hairline for lines; a negative one
        // drops the stroke altogether.
        let has_width = self.stroke_width.is_finite() && self.stroke_width >= 0.0;
        ResolvedStyle {
            fill: self.fill.color().map(|c| c.with_opacity(opacity)),
            stroke: self
                .stroke
                .color()
                .filter(|_| has_width)
                .map(|c| c.with_opacity(opacity)),
            stroke_width: if has_width { self.stroke_width as i64 } else { 0 },
        }
    }
}

/// A [`Style`] ready for the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: i64,
}

/// Where a shape lands: its effective matrix plus the cumulative `Scale`
/// factors used to size radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub matrix: Matrix,
    pub scale: (f64, f64),
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    pub const IDENTITY: Placement = Placement {
        matrix: Matrix::IDENTITY,
        scale: (1.0, 1.0),
    };

    pub fn new(matrix: Matrix, scale: (f64, f64)) -> Self {
        Self { matrix, scale }
    }

    /// `self` outside, `inner` applied first.
    pub fn then(&self, inner: &Placement) -> Placement {
        Placement {
            matrix: self.matrix * inner.matrix,
            scale: (self.scale.0 * inner.scale.0, self.scale.1 * inner.scale.1),
        }
    }

    /// Uniform approximation of the scale: the mean of the x and y factors.
    pub fn mean_scale(&self) -> f64 {
        (self.scale.0.abs() + self.scale.1.abs()) / 2.0
    }
}

/// Geometry in canvas space, ready to rasterize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placed {
    Circle { center: DVec2, radius: f64 },
    /// Axis-aligned box enclosing the transformed corners.
    Rect(BBox),
    RoundedRect { bounds: BBox, rx: f64, ry: f64 },
    Line { from: DVec2, to: DVec2 },
}
