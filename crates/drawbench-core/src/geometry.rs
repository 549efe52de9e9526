//! Geometry helpers shared by the snap and alignment code.

use crate::shapes::Shape;
use kurbo::Point;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Squared Euclidean distance (avoids the sqrt in hot comparisons).
pub fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Combined bounding box of a set of shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionBounds {
    /// Compute the union bounds of the given shapes.
    /// Returns `None` for an empty slice.
    pub fn from_shapes(shapes: &[Shape]) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for shape in shapes {
            let bounds = shape.bounds();
            min_x = min_x.min(bounds.x0);
            min_y = min_y.min(bounds.y0);
            max_x = max_x.max(bounds.x1);
            max_y = max_y.max(bounds.y1);
        }

        if min_x.is_infinite() {
            return None;
        }

        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            center_x: (min_x + max_x) / 2.0,
            center_y: (min_y + max_y) / 2.0,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}
