//! Default sizes and settings (pixels)

use crate::color::Rgb;

/// Canvas size used when neither the target nor the document gives one.
pub const CANVAS_WIDTH: u32 = 500;
pub const CANVAS_HEIGHT: u32 = 300;
pub const BACKGROUND: Rgb = Rgb::WHITE;

pub const FILL: Rgb = Rgb::BLACK;
pub const LINE_STROKE: Rgb = Rgb::BLACK;
pub const STROKE_WIDTH: f64 = 1.0;
pub const OPACITY: f64 = 1.0;
