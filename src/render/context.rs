//! Rendering context - state for one pass over a document

use crate::canvas::Canvas;
use crate::group::ComposedGroups;

use super::raster;
use super::shapes::{Geometry, Shape};
use super::types::Placement;

/// Rendering context
pub struct RenderContext {
    /// The buffer being painted
    pub canvas: Canvas,
    /// Every group's effective matrix, computed once up front
    pub groups: ComposedGroups,
    /// Outermost placement: document units to canvas pixels
    pub viewport: Placement,
}

impl RenderContext {
    pub fn new(canvas: Canvas, groups: ComposedGroups, viewport: Placement) -> Self {
        Self {
            canvas,
            groups,
            viewport,
        }
    }

    /// Resolve, transform and rasterize one shape.
    pub fn paint_shape(&mut self, shape: &Shape) {
        let placement = self.viewport.then(&shape.placement(&self.groups));
        let Some(placed) = shape.geometry.place(&placement) else {
            crate::log::debug!(id = shape.id, kind = shape.geometry.kind(), "degenerate shape skipped");
            return;
        };
        crate::log::trace!(id = shape.id, ?placed, "paint");
        raster::paint(&mut self.canvas, &placed, &shape.style.resolve());
    }

    pub fn finish(self) -> Canvas {
        self.canvas
    }
}
