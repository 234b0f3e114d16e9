//! Render simple vector scenes to RGB pixel buffers.
//!
//! A [`Document`] holds circles, rectangles, rounded rectangles and lines,
//! optionally nested in groups. Every group and shape may carry an SVG-style
//! transform list; a shape's effective transform is its ancestors' chains
//! composed outermost first, followed by its own.
//!
//! ```
//! use sceneraster::{DocumentBuilder, TransformChain, render, Rgb};
//!
//! let mut doc = DocumentBuilder::new(100.0, 100.0);
//! doc.begin_group(TransformChain::parse("translate(50, 50)"));
//! doc.circle(0.0, 0.0, 20.0).style.fill = "red".into();
//! doc.end_group()?;
//!
//! let canvas = render(&doc.build(), 0, 0)?;
//! assert_eq!(canvas.pixel(50, 50), Some(Rgb::new(255, 0, 0)));
//! assert_eq!(canvas.pixel(0, 0), Some(Rgb::WHITE));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod color;
pub mod document;
pub mod errors;
pub mod group;
mod log;
pub mod matrix;
pub mod render;
pub mod transform;
pub mod types;

pub use canvas::Canvas;
pub use color::{Paint, Rgb, resolve_color};
pub use document::{Document, DocumentBuilder};
pub use errors::{RenderError, SceneError, TransformError};
pub use group::{ComposedGroups, GroupId, GroupTree};
pub use matrix::Matrix;
pub use render::shapes::{Circle, Geometry, Line, Rect, RoundedRect, Shape, ShapeGeometry};
pub use render::{RenderOptions, Renderer, Style, render, render_with_options};
pub use transform::{TransformChain, TransformOp};
