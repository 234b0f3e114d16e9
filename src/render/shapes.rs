//! Shape types for scene rendering
//!
//! Each geometry kind is its own type that knows how to:
//! - Report its default style
//! - Map its defining points into canvas space through a [`Placement`]
//!
//! [`ShapeGeometry`] dispatches to them through `enum_dispatch`.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::group::{ComposedGroups, GroupId, GroupTree};
use crate::matrix::Matrix;
use crate::transform::TransformChain;
use crate::types::BBox;

use super::types::{Placed, Placement, Style};

/// Common behavior for all geometry kinds
#[enum_dispatch]
pub trait Geometry {
    /// Short lowercase name, as it would appear in markup.
    fn kind(&self) -> &'static str;

    /// Style used when the caller does not give one.
    fn default_style(&self) -> Style {
        Style::default()
    }

    /// Transform the defining points into canvas space.
    ///
    /// Returns `None` for geometry that paints nothing: negative or NaN
    /// sizes, or coordinates that stop being finite once transformed.
    fn place(&self, placement: &Placement) -> Option<Placed>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Geometry for Circle {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn place(&self, placement: &Placement) -> Option<Placed> {
        if !is_extent(self.r) {
            return None;
        }
        let center = finite_point(placement.matrix.apply(dvec2(self.cx, self.cy)))?;
        // Rotation and shear leave the radius alone.
        let radius = self.r * placement.mean_scale();
        is_extent(radius).then_some(Placed::Circle { center, radius })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry for Rect {
    fn kind(&self) -> &'static str {
        "rect"
    }

    fn place(&self, placement: &Placement) -> Option<Placed> {
        transformed_box(&placement.matrix, self.x, self.y, self.width, self.height).map(Placed::Rect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Geometry for RoundedRect {
    fn kind(&self) -> &'static str {
        "roundrect"
    }

    fn place(&self, placement: &Placement) -> Option<Placed> {
        let bounds = transformed_box(&placement.matrix, self.x, self.y, self.width, self.height)?;
        // Negative or NaN radii give square corners.
        let radius = |r: f64, s: f64| if is_extent(r) { r * s.abs() } else { 0.0 };
        Some(Placed::RoundedRect {
            bounds,
            rx: radius(self.rx, placement.scale.0),
            ry: radius(self.ry, placement.scale.1),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Geometry for Line {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn default_style(&self) -> Style {
        Style::line()
    }

    fn place(&self, placement: &Placement) -> Option<Placed> {
        Some(Placed::Line {
            from: finite_point(placement.matrix.apply(dvec2(self.x1, self.y1)))?,
            to: finite_point(placement.matrix.apply(dvec2(self.x2, self.y2)))?,
        })
    }
}

/// The geometry payload of a [`Shape`].
#[enum_dispatch(Geometry)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Circle(Circle),
    Rect(Rect),
    RoundedRect(RoundedRect),
    Line(Line),
}

/// A shape as stored in a document: geometry, style, owning group and a
/// private transform chain applied after the group's.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Sequential, starting at 1, in creation order.
    pub id: u32,
    pub geometry: ShapeGeometry,
    pub style: Style,
    pub group: Option<GroupId>,
    pub transform: TransformChain,
}

impl Shape {
    /// Effective matrix: the owning group's composed matrix × own chain.
    ///
    /// Walks the ancestor chain on every call; the renderer goes through
    /// [`Shape::placement`] with a precomputed table instead.
    pub fn compose_shape_matrix(&self, groups: &GroupTree) -> Matrix {
        groups.compose_group_matrix(self.group) * self.transform.compose()
    }

    /// Cumulative `Scale` factors of the owning groups and the private chain.
    pub fn scale_factors(&self, groups: &GroupTree) -> (f64, f64) {
        let (gx, gy) = groups.scale_factors(self.group);
        let (sx, sy) = self.transform.scale_factors();
        (gx * sx, gy * sy)
    }

    pub fn placement(&self, groups: &ComposedGroups) -> Placement {
        let group = groups.get(self.group);
        Placement::new(group.matrix, group.scale).then(&Placement::new(
            self.transform.compose(),
            self.transform.scale_factors(),
        ))
    }
}

fn is_extent(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn finite_point(p: DVec2) -> Option<DVec2> {
    p.is_finite().then_some(p)
}

/// Axis-aligned box around the four transformed corners.
fn transformed_box(m: &Matrix, x: f64, y: f64, width: f64, height: f64) -> Option<BBox> {
    if !is_extent(width) || !is_extent(height) {
        return None;
    }
    let corners = [
        dvec2(x, y),
        dvec2(x + width, y),
        dvec2(x + width, y + height),
        dvec2(x, y + height),
    ];
    let mut points = [DVec2::ZERO; 4];
    for (out, corner) in points.iter_mut().zip(corners) {
        *out = finite_point(m.apply(corner))?;
    }
    Some(BBox::from_points(points))
}
