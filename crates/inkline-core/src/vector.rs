//! 2D vector helpers used by the stroke engine.
//!
//! Thin wrappers over [`kurbo`] types. Positions are [`Point`]s and
//! directions/offsets are [`Vec2`]s.

use kurbo::{Affine, Point, Vec2};

/// Component-wise sum.
#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Component-wise difference `a - b`.
#[inline]
pub fn sub(a: Point, b: Point) -> Vec2 {
    a - b
}

/// Scale a vector.
#[inline]
pub fn mul(a: Vec2, s: f64) -> Vec2 {
    a * s
}

/// Unit vector in the direction of `a`.
///
/// Zero-length input is a programming error: retained points are always at
/// least the skip distance apart.
#[inline]
pub fn normalize(a: Vec2) -> Vec2 {
    let len = a.hypot();
    debug_assert!(len > 0.0, "normalize of zero-length vector");
    a / len
}

/// Rotate by 90 degrees: `(x, y) -> (y, -x)`.
///
/// Left offsets are `p + perpendicular(dir) * r`, right offsets subtract it.
#[inline]
pub fn perpendicular(a: Vec2) -> Vec2 {
    Vec2::new(a.y, -a.x)
}

/// Reverse a vector.
#[inline]
pub fn negate(a: Vec2) -> Vec2 {
    -a
}

/// Point halfway between `a` and `b`.
#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Dot product.
#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.dot(b)
}

/// Linear interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

/// Project `a` along `b` by `c`: `a + b * c`.
#[inline]
pub fn project(a: Point, b: Vec2, c: f64) -> Point {
    a + b * c
}

/// Rotate `point` about `center` by `angle` radians.
#[inline]
pub fn rotate_about(point: Point, center: Point, angle: f64) -> Point {
    Affine::rotate_about(angle, center) * point
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}
