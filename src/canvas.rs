//! The output pixel buffer: a fixed-size, row-major RGB grid.
//!
//! Writes outside the canvas are dropped silently. Encoders take the buffer
//! by value through [`Canvas::into_bytes`].

use crate::color::Rgb;
use crate::errors::RenderError;

const BYTES_PER_PIXEL: usize = 3;

#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    ///
    /// Fails only when the buffer cannot be allocated (or its size does not
    /// fit in memory at all).
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, RenderError> {
        let alloc_err = RenderError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| alloc_err.clone())?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_err)?;
        for _ in 0..(len / BYTES_PER_PIXEL) {
            pixels.extend_from_slice(&[background.r, background.g, background.b]);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        let i = self.index(x, y)?;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Bounds-checked write; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    /// Horizontal run from `x0` to `x1` inclusive, clipped.
    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgb) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let start = x0.max(0);
        let end = x1.min(self.width as i64 - 1);
        for x in start..=end {
            self.set_pixel(x, y, color);
        }
    }

    /// Vertical run from `y0` to `y1` inclusive, clipped.
    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgb) {
        if x < 0 || x >= self.width as i64 {
            return;
        }
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let start = y0.max(0);
        let end = y1.min(self.height as i64 - 1);
        for y in start..=end {
            self.set_pixel(x, y, color);
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| *px == [color.r, color.g, color.b])
            .count()
    }

    /// Row-major RGB bytes, three per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// One character per pixel, one line per row. Handy for eyeballing small
    /// renders and for snapshot tests.
    pub fn to_ascii(&self, glyph: impl Fn(Rgb) -> char) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i64 {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width as i64 {
                if let Some(px) = self.pixel(x, y) {
                    out.push(glyph(px));
                }
            }
        }
        out
    }
}
