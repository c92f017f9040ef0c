//! Outline point rings to paths.

use kurbo::{BezPath, Point};

/// How an outline ring is turned into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// Straight segments between outline points.
    Polygon,
    /// Quadratic curves through the midpoints of the outline segments.
    #[default]
    Smooth,
}

impl PathStyle {
    pub fn build(self, points: &[Point]) -> BezPath {
        match self {
            PathStyle::Polygon => outline_path(points),
            PathStyle::Smooth => smooth_outline_path(points),
        }
    }
}

/// Closed polygon through `points`.
pub fn outline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path.close_path();
    path
}

/// Closed curve using each outline point as the control point of a quadratic
/// segment between neighbouring midpoints.
pub fn smooth_outline_path(points: &[Point]) -> BezPath {
    let n = points.len();
    if n < 3 {
        return outline_path(points);
    }

    let mut path = BezPath::new();
    path.move_to(points[0].midpoint(points[1]));
    for i in 1..=n {
        let control = points[i % n];
        let next = points[(i + 1) % n];
        path.quad_to(control, control.midpoint(next));
    }
    path.close_path();
    path
}
