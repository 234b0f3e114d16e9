//! The scene: declared size, shapes in paint order, and the group arena.
//!
//! Parsers build a [`Document`] through [`DocumentBuilder`], which mirrors
//! the nesting of the markup: `begin_group` when a group element opens,
//! `end_group` when it closes.

use std::fmt;

use crate::errors::SceneError;
use crate::group::{GroupId, GroupTree};
use crate::render::shapes::{Circle, Geometry, Line, Rect, RoundedRect, Shape, ShapeGeometry};
use crate::render::Style;
use crate::transform::TransformChain;

#[derive(Debug, Clone, Default)]
pub struct Document {
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
    groups: GroupTree,
}

impl Document {
    /// Declared width. Zero, negative or non-finite means "not given".
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Declared size, if both dimensions are usable.
    pub fn declared_size(&self) -> Option<(f64, f64)> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        (usable(self.width) && usable(self.height)).then_some((self.width, self.height))
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn groups(&self) -> &GroupTree {
        &self.groups
    }

    pub fn shape(&self, id: u32) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }
}

/// Human-readable dump, one line per shape, indented by group depth.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "document {}x{}: {} shapes, {} groups",
            self.width,
            self.height,
            self.shapes.len(),
            self.groups.len()
        )?;
        for shape in &self.shapes {
            let depth = self.groups.depth(shape.group);
            write!(f, "{:indent$}#{} {}", "", shape.id, shape.geometry.kind(), indent = depth * 2)?;
            if let Some(g) = shape.group {
                write!(f, " in {g}")?;
            }
            if !shape.transform.is_empty() {
                write!(f, " transform=\"{}\"", shape.transform)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Scope-style construction of a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
    open: Vec<GroupId>,
    next_id: u32,
}

impl DocumentBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            doc: Document {
                width,
                height,
                ..Document::default()
            },
            open: Vec::new(),
            next_id: 1,
        }
    }

    /// The innermost open group, if any.
    pub fn current_group(&self) -> Option<GroupId> {
        self.open.last().copied()
    }

    /// Open a group nested in the current one. Shapes and groups added
    /// until the matching [`end_group`](Self::end_group) belong to it.
    pub fn begin_group(&mut self, transform: TransformChain) -> GroupId {
        self.open_group(None, transform)
    }

    pub fn begin_named_group(&mut self, name: impl Into<String>, transform: TransformChain) -> GroupId {
        self.open_group(Some(name.into()), transform)
    }

    fn open_group(&mut self, name: Option<String>, transform: TransformChain) -> GroupId {
        let parent = self.current_group();
        // Every id on the open stack came from this arena.
        let id = self.doc.groups.push(name, parent, transform);
        crate::log::trace!(group = %id, ?parent, "begin group");
        self.open.push(id);
        id
    }

    pub fn end_group(&mut self) -> Result<GroupId, SceneError> {
        let id = self.open.pop().ok_or(SceneError::NoOpenGroup)?;
        crate::log::trace!(group = %id, "end group");
        Ok(id)
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) -> &mut Shape {
        self.add(Circle { cx, cy, r }, None, TransformChain::new())
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Shape {
        self.add(Rect { x, y, width, height }, None, TransformChain::new())
    }

    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    ) -> &mut Shape {
        let geometry = RoundedRect { x, y, width, height, rx, ry };
        self.add(geometry, None, TransformChain::new())
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Shape {
        self.add(Line { x1, y1, x2, y2 }, None, TransformChain::new())
    }

    /// Append a shape to the current group. `None` style means the
    /// geometry's default.
    pub fn add(
        &mut self,
        geometry: impl Into<ShapeGeometry>,
        style: Option<Style>,
        transform: TransformChain,
    ) -> &mut Shape {
        let geometry = geometry.into();
        let id = self.next_id;
        self.next_id += 1;
        let group = self.current_group();
        crate::log::trace!(id, kind = geometry.kind(), ?group, "add shape");
        self.doc.shapes.push(Shape {
            id,
            style: style.unwrap_or_else(|| geometry.default_style()),
            geometry,
            group,
            transform,
        });
        let last = self.doc.shapes.len() - 1;
        &mut self.doc.shapes[last]
    }

    /// Finish the document. Groups still open are closed implicitly.
    pub fn build(self) -> Document {
        if !self.open.is_empty() {
            crate::log::warn!(open = self.open.len(), "groups left open at end of document");
        }
        self.doc
    }
}
