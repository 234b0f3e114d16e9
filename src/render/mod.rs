//! Raster rendering for scene documents
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `types`: Style, Placement and placed geometry
//! - `shapes`: Geometry kinds and the `Shape` record
//! - `context`: RenderContext for state during one pass
//! - `raster`: Scan algorithms that write pixels

pub mod context;
pub mod defaults;
pub mod raster;
pub mod shapes;
pub mod types;

pub use context::RenderContext;
pub use types::*;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::document::Document;
use crate::errors::RenderError;
use crate::group::ComposedGroups;
use crate::matrix::Matrix;

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Canvas width when neither the target nor the document gives one
    pub default_width: u32,
    /// Canvas height when neither the target nor the document gives one
    pub default_height: u32,
    /// Color the canvas starts as
    pub background: Rgb,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_width: defaults::CANVAS_WIDTH,
            default_height: defaults::CANVAS_HEIGHT,
            background: defaults::BACKGROUND,
        }
    }
}

impl RenderOptions {
    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `doc` onto a fresh canvas.
    ///
    /// A zero target dimension falls back to the document's declared size,
    /// then to the configured default. When the canvas size differs from the
    /// declared size the whole scene is scaled to fit.
    pub fn render(
        &self,
        doc: &Document,
        target_width: u32,
        target_height: u32,
    ) -> Result<Canvas, RenderError> {
        let (width, height) = self.canvas_size(doc, target_width, target_height);
        let viewport = viewport(doc, width, height);
        crate::log::debug!(
            width,
            height,
            shapes = doc.shapes().len(),
            groups = doc.groups().len(),
            scale_x = viewport.scale.0,
            scale_y = viewport.scale.1,
            "render"
        );

        let canvas = Canvas::new(width, height, self.options.background)?;
        let mut ctx = RenderContext::new(canvas, ComposedGroups::new(doc.groups()), viewport);
        for shape in doc.shapes() {
            ctx.paint_shape(shape);
        }
        Ok(ctx.finish())
    }

    fn canvas_size(&self, doc: &Document, target_width: u32, target_height: u32) -> (u32, u32) {
        let pick = |target: u32, declared: f64, default: u32| {
            if target > 0 {
                target
            } else if declared.is_finite() && declared >= 1.0 {
                declared.min(u32::MAX as f64) as u32
            } else {
                default
            }
        };
        (
            pick(target_width, doc.width(), self.options.default_width),
            pick(target_height, doc.height(), self.options.default_height),
        )
    }
}

/// Scale from declared document units to canvas pixels. Identity when the
/// document declares no size or already matches the canvas.
fn viewport(doc: &Document, width: u32, height: u32) -> Placement {
    let Some((declared_w, declared_h)) = doc.declared_size() else {
        return Placement::IDENTITY;
    };
    let sx = width as f64 / declared_w;
    let sy = height as f64 / declared_h;
    if sx == 1.0 && sy == 1.0 {
        return Placement::IDENTITY;
    }
    Placement::new(Matrix::scale(sx, sy), (sx, sy))
}

/// Render with default options.
pub fn render(doc: &Document, target_width: u32, target_height: u32) -> Result<Canvas, RenderError> {
    Renderer::default().render(doc, target_width, target_height)
}

/// Render with custom options.
pub fn render_with_options(
    doc: &Document,
    target_width: u32,
    target_height: u32,
    options: RenderOptions,
) -> Result<Canvas, RenderError> {
    Renderer::new(options).render(doc, target_width, target_height)
}
