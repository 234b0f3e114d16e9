//! Scan algorithms: paint placed geometry into a [`Canvas`].
//!
//! No anti-aliasing. Every write goes through the canvas bounds check, and
//! loops are clipped to the canvas first so far-away geometry costs nothing.

use glam::{DVec2, dvec2};

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::types::{BBox, PixelRect};

use super::types::{Placed, ResolvedStyle};

/// Paint one placed shape: fill first, stroke over it.
pub fn paint(canvas: &mut Canvas, placed: &Placed, style: &ResolvedStyle) {
    let stroke = style.stroke.filter(|_| style.stroke_width > 0);
    match *placed {
        Placed::Circle { center, radius } => {
            if let Some(color) = style.fill {
                fill_circle(canvas, center, radius, color);
            }
            if let Some(color) = stroke {
                stroke_circle(canvas, center, radius, style.stroke_width, color);
            }
        }
        Placed::Rect(bounds) => {
            let rect = bounds.to_pixels();
            if let Some(color) = style.fill {
                fill_rect(canvas, rect, color);
            }
            if let Some(color) = stroke {
                stroke_rect(canvas, rect, style.stroke_width, color);
            }
        }
        Placed::RoundedRect { bounds, rx, ry } => {
            let shape = RoundedOutline::new(bounds, rx, ry);
            if let Some(color) = style.fill {
                fill_rounded(canvas, &shape, color);
            }
            if let Some(color) = stroke {
                stroke_rounded(canvas, &shape, style.stroke_width, color);
            }
        }
        Placed::Line { from, to } => {
            // A line has no interior; an explicit fill is ignored.
            if let Some(color) = style.stroke {
                draw_line(canvas, from, to, style.stroke_width, color);
            }
        }
    }
}

/// Integer center and the clipped square of pixels within `extent` of it.
fn circle_scan(canvas: &Canvas, center: DVec2, extent: f64) -> (DVec2, PixelRect) {
    let c = center.floor();
    let lo = (c - extent).max(DVec2::ZERO);
    let hi = (c + extent + 1.0).min(dvec2(canvas.width() as f64, canvas.height() as f64));
    let rect = PixelRect {
        x0: lo.x as i64,
        y0: lo.y as i64,
        x1: hi.x as i64,
        y1: hi.y as i64,
    };
    (c, rect)
}

/// Painted iff `dx² + dy² ≤ r²` from the integer center.
pub fn fill_circle(canvas: &mut Canvas, center: DVec2, radius: f64, color: Rgb) {
    let (c, scan) = circle_scan(canvas, center, radius.floor());
    let r2 = radius * radius;
    for y in scan.y0..scan.y1 {
        for x in scan.x0..scan.x1 {
            if dvec2(x as f64, y as f64).distance_squared(c) <= r2 {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

/// Outward ring: `r < distance ≤ r + width`.
pub fn stroke_circle(canvas: &mut Canvas, center: DVec2, radius: f64, width: i64, color: Rgb) {
    let outer = radius + width as f64;
    let (c, scan) = circle_scan(canvas, center, outer.floor());
    let (inner2, outer2) = (radius * radius, outer * outer);
    for y in scan.y0..scan.y1 {
        for x in scan.x0..scan.x1 {
            let d2 = dvec2(x as f64, y as f64).distance_squared(c);
            if d2 > inner2 && d2 <= outer2 {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

pub fn fill_rect(canvas: &mut Canvas, rect: PixelRect, color: Rgb) {
    let clipped = rect.clip(canvas.width(), canvas.height());
    if clipped.is_empty() {
        return;
    }
    for y in clipped.y0..clipped.y1 {
        canvas.hline(clipped.x0, clipped.x1 - 1, y, color);
    }
}

/// `width` concentric rings; ring `i` is the border of `rect` grown by `i`.
///
/// Together the rings cover `rect.grow(width - 1)` minus the interior of
/// `rect` shrunk by one, so this scans that band row by row.
pub fn stroke_rect(canvas: &mut Canvas, rect: PixelRect, width: i64, color: Rgb) {
    if rect.is_empty() || width <= 0 {
        return;
    }
    let outer = rect.grow(width - 1);
    let inner = rect.grow(-1);
    let clipped = outer.clip(canvas.width(), canvas.height());
    if clipped.is_empty() {
        return;
    }
    for y in clipped.y0..clipped.y1 {
        if inner.is_empty() || y < inner.y0 || y >= inner.y1 {
            canvas.hline(clipped.x0, clipped.x1 - 1, y, color);
        } else {
            canvas.hline(clipped.x0, inner.x0 - 1, y, color);
            canvas.hline(inner.x1, clipped.x1 - 1, y, color);
        }
    }
}

/// A pixel-snapped box with elliptical corners.
///
/// Membership is decided at pixel centers. Growing the outline by `k` moves
/// every edge out by `k` and every corner radius up by `k`, keeping the
/// corner centers fixed.
#[derive(Debug, Clone, Copy)]
struct RoundedOutline {
    rect: PixelRect,
    rx: f64,
    ry: f64,
}

impl RoundedOutline {
    fn new(bounds: BBox, rx: f64, ry: f64) -> Self {
        let rect = bounds.to_pixels();
        Self {
            rect,
            rx: rx.clamp(0.0, rect.width() as f64 / 2.0),
            ry: ry.clamp(0.0, rect.height() as f64 / 2.0),
        }
    }

    fn contains(&self, x: i64, y: i64, grow: i64) -> bool {
        let r = self.rect.grow(grow);
        if x < r.x0 || x >= r.x1 || y < r.y0 || y >= r.y1 {
            return false;
        }
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return true;
        }
        let p = dvec2(x as f64 + 0.5, y as f64 + 0.5);
        let (x0, y0) = (self.rect.x0 as f64, self.rect.y0 as f64);
        let (x1, y1) = (self.rect.x1 as f64, self.rect.y1 as f64);

        let cx = if p.x < x0 + self.rx {
            x0 + self.rx
        } else if p.x > x1 - self.rx {
            x1 - self.rx
        } else {
            return true;
        };
        let cy = if p.y < y0 + self.ry {
            y0 + self.ry
        } else if p.y > y1 - self.ry {
            y1 - self.ry
        } else {
            return true;
        };

        let (rx, ry) = (self.rx + grow as f64, self.ry + grow as f64);
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let d = (p - dvec2(cx, cy)) / dvec2(rx, ry);
        d.length_squared() <= 1.0
    }
}

fn fill_rounded(canvas: &mut Canvas, shape: &RoundedOutline, color: Rgb) {
    let scan = shape.rect.clip(canvas.width(), canvas.height());
    for y in scan.y0..scan.y1 {
        for x in scan.x0..scan.x1 {
            if shape.contains(x, y, 0) {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

/// Ring `i` is inside the outline grown by `i` and outside it grown by
/// `i - 1`, for `i` in `0..width`.
fn stroke_rounded(canvas: &mut Canvas, shape: &RoundedOutline, width: i64, color: Rgb) {
    if shape.rect.is_empty() || width <= 0 {
        return;
    }
    let scan = shape
        .rect
        .grow(width - 1)
        .clip(canvas.width(), canvas.height());
    for y in scan.y0..scan.y1 {
        for x in scan.x0..scan.x1 {
            if shape.contains(x, y, width - 1) && !shape.contains(x, y, -1) {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

/// Bresenham between the truncated endpoints, stamping a square brush of
/// half-width `width / 2` at every step.
///
/// Only the steps whose brush can reach the canvas are walked. The walk is
/// seeded at the first of them, so the pixels are the ones the full walk
/// would paint.
pub fn draw_line(canvas: &mut Canvas, from: DVec2, to: DVec2, width: i64, color: Rgb) {
    let half = width.max(0) / 2;
    let line = Bresenham::new(
        (pixel_coord(from.x), pixel_coord(from.y)),
        (pixel_coord(to.x), pixel_coord(to.y)),
    );
    let Some((first, last)) = line.visible_steps(canvas.width(), canvas.height(), half) else {
        return;
    };

    let (dx, dy) = (line.dx as i128, line.dy as i128);
    let (mut x, mut y, mut err) = line.state_at(first);
    for _ in first..=last {
        stamp(canvas, x, y, half, color);
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += line.sx;
        }
        if e2 < dx {
            err += dx;
            y += line.sy;
        }
    }
}

/// Truncate toward zero into the `i32` range.
fn pixel_coord(v: f64) -> i64 {
    v as i32 as i64
}

fn stamp(canvas: &mut Canvas, x: i64, y: i64, half: i64, color: Rgb) {
    if half == 0 {
        canvas.set_pixel(x, y, color);
        return;
    }
    let brush = PixelRect {
        x0: x.saturating_sub(half),
        y0: y.saturating_sub(half),
        x1: x.saturating_add(half).saturating_add(1),
        y1: y.saturating_add(half).saturating_add(1),
    };
    fill_rect(canvas, brush, color);
}

/// Integer line from `(x0, y0)`, `max(dx, dy)` steps long.
///
/// The error term is a function of how far the walk has moved:
/// `dx - dy - nx * dy + ny * dx` after `nx` steps along x and `ny` along y.
/// The major axis advances on every step, and the minor axis after `k` steps
/// is `(2 * k * minor + major - 1) / (2 * major)`.
#[derive(Debug, Clone, Copy)]
struct Bresenham {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
}

impl Bresenham {
    fn new((x0, y0): (i64, i64), (x1, y1): (i64, i64)) -> Self {
        Self {
            x0,
            y0,
            dx: (x1 - x0).abs(),
            dy: (y1 - y0).abs(),
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
        }
    }

    fn x_major(&self) -> bool {
        self.dx >= self.dy
    }

    fn steps(&self) -> i64 {
        self.dx.max(self.dy)
    }

    /// Pixel and error term after `k` steps.
    fn state_at(&self, k: i64) -> (i64, i64, i128) {
        let (major, minor) = if self.x_major() {
            (self.dx as i128, self.dy as i128)
        } else {
            (self.dy as i128, self.dx as i128)
        };
        let m = if major == 0 {
            0
        } else {
            ((2 * k as i128 * minor + major - 1) / (2 * major)) as i64
        };
        let (nx, ny) = if self.x_major() { (k, m) } else { (m, k) };
        let (dx, dy) = (self.dx as i128, self.dy as i128);
        let err = dx - dy - nx as i128 * dy + ny as i128 * dx;
        (self.x0 + self.sx * nx, self.y0 + self.sy * ny, err)
    }

    /// Inclusive step range whose major coordinate lies within `half` of a
    /// `width`x`height` canvas.
    fn visible_steps(&self, width: u32, height: u32, half: i64) -> Option<(i64, i64)> {
        let (start, dir, extent) = if self.x_major() {
            (self.x0, self.sx, width)
        } else {
            (self.y0, self.sy, height)
        };
        let lo = -half;
        let hi = (extent as i64 - 1).saturating_add(half);
        let (first, last) = if dir > 0 {
            (lo.saturating_sub(start), hi.saturating_sub(start))
        } else {
            (start.saturating_sub(hi), start.saturating_sub(lo))
        };
        let (first, last) = (first.max(0), last.min(self.steps()));
        (first <= last).then_some((first, last))
    }
}
