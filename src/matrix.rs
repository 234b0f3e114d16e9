//! 3×3 affine matrices in homogeneous coordinates.
//!
//! Backed by [`glam::DMat3`] (column-major). The bottom row is always
//! `[0, 0, 1]`; none of the constructors here produce anything else.
//!
//! `a * b` maps a point through `b` first, then `a`.

use std::ops::{Mul, MulAssign};

use glam::{DMat3, DVec2, DVec3, dvec2, dvec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(DMat3);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix(DMat3::IDENTITY);

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::from_raw(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// Zero factors are allowed; they collapse geometry onto a line or point.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_raw(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`, positive from +x toward +y.
    ///
    /// On a y-down raster this turns clockwise on screen, as SVG does.
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_raw(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about `(cx, cy)` instead of the origin.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy) * Self::rotate(degrees) * Self::translate(-cx, -cy)
    }

    /// SVG-style `matrix(a, b, c, d, e, f)`:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    pub fn from_raw(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Matrix(DMat3::from_cols(
            dvec3(a, b, 0.0),
            dvec3(c, d, 0.0),
            dvec3(e, f, 1.0),
        ))
    }

    /// The six affine coefficients `[a, b, c, d, e, f]`.
    pub fn to_raw(&self) -> [f64; 6] {
        let m = &self.0;
        [
            m.x_axis.x, m.x_axis.y, m.y_axis.x, m.y_axis.y, m.z_axis.x, m.z_axis.y,
        ]
    }

    pub fn multiply(&self, rhs: &Matrix) -> Matrix {
        Matrix(self.0 * rhs.0)
    }

    pub fn apply_to_point(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.apply(dvec2(x, y));
        (p.x, p.y)
    }

    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.0.transform_point2(p)
    }

    /// Row 2 of the homogeneous form.
    pub fn bottom_row(&self) -> DVec3 {
        self.0.row(2)
    }

    pub fn abs_diff_eq(&self, other: &Matrix, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    pub fn as_dmat3(&self) -> &DMat3 {
        &self.0
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

impl MulAssign for Matrix {
    fn mul_assign(&mut self, rhs: Matrix) {
        *self = self.multiply(&rhs);
    }
}
