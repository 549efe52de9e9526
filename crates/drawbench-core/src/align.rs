//! Stateless batch repositioning: align, distribute, grid layout, spacing.
//!
//! All functions mutate the given slice in place and leave history to the
//! caller. Shapes without an explicit size count as the 80x80 default.

use crate::geometry::SelectionBounds;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// Alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Flush left edges to the group's left edge.
    Left,
    /// Flush right edges to the group's right edge.
    Right,
    /// Center horizontally on the group's center.
    Center,
    /// Flush top edges to the group's top edge.
    Top,
    /// Flush bottom edges to the group's bottom edge.
    Bottom,
    /// Center vertically on the group's center.
    Middle,
}

/// Axis for distribution and spacing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Align shapes against their combined bounds. No-op for fewer than 2 shapes.
pub fn align(shapes: &mut [Shape], alignment: Alignment) {
    if shapes.len() < 2 {
        return;
    }
    let Some(bounds) = SelectionBounds::from_shapes(shapes) else {
        return;
    };

    for shape in shapes.iter_mut() {
        let size = shape.size();
        match alignment {
            Alignment::Left => shape.position.x = bounds.min_x,
            Alignment::Right => shape.position.x = bounds.max_x - size.width,
            Alignment::Center => shape.position.x = bounds.center_x - size.width / 2.0,
            Alignment::Top => shape.position.y = bounds.min_y,
            Alignment::Bottom => shape.position.y = bounds.max_y - size.height,
            Alignment::Middle => shape.position.y = bounds.center_y - size.height / 2.0,
        }
        shape.touch();
    }
}

/// Distribute shapes with equal gaps along an axis, keeping the first and
/// last (by position) fixed. No-op for fewer than 3 shapes.
pub fn distribute(shapes: &mut [Shape], axis: Axis) {
    if shapes.len() < 3 {
        return;
    }

    let mut order: Vec<usize> = (0..shapes.len()).collect();
    order.sort_by(|&a, &b| axis_pos(&shapes[a], axis).total_cmp(&axis_pos(&shapes[b], axis)));

    let first = order[0];
    let last = order[order.len() - 1];
    let middles = &order[1..order.len() - 1];

    // Space between the first shape's trailing edge and the last shape's
    // leading edge, minus the middle shapes themselves, split into equal gaps.
    let start = axis_pos(&shapes[first], axis) + axis_extent(&shapes[first], axis);
    let available = axis_pos(&shapes[last], axis) - start;
    let occupied: f64 = middles.iter().map(|&i| axis_extent(&shapes[i], axis)).sum();
    let gap = (available - occupied) / (middles.len() + 1) as f64;

    let mut cursor = start;
    for &i in middles {
        cursor += gap;
        set_axis_pos(&mut shapes[i], axis, cursor);
        cursor += axis_extent(&shapes[i], axis);
    }
}

/// Lay shapes out on a grid by their array order, anchored at the minimum
/// x/y among the inputs. `columns` of 0 is a no-op.
pub fn create_grid(shapes: &mut [Shape], columns: usize, spacing: f64) {
    if shapes.is_empty() || columns == 0 {
        return;
    }

    let anchor_x = shapes
        .iter()
        .map(|s| s.position.x)
        .fold(f64::INFINITY, f64::min);
    let anchor_y = shapes
        .iter()
        .map(|s| s.position.y)
        .fold(f64::INFINITY, f64::min);

    for (index, shape) in shapes.iter_mut().enumerate() {
        let row = index / columns;
        let col = index % columns;
        let size = shape.size();
        shape.position.x = anchor_x + col as f64 * (size.width + spacing);
        shape.position.y = anchor_y + row as f64 * (size.height + spacing);
        shape.touch();
    }
}

/// Re-place shapes along an axis so that consecutive gaps all equal
/// `reference` spacing. Sorts by the axis position; original spacing is
/// discarded entirely.
pub fn match_spacing(shapes: &mut [Shape], reference: f64, axis: Axis) {
    if shapes.len() < 2 {
        return;
    }

    let mut order: Vec<usize> = (0..shapes.len()).collect();
    order.sort_by(|&a, &b| axis_pos(&shapes[a], axis).total_cmp(&axis_pos(&shapes[b], axis)));

    let first = order[0];
    let mut cursor = axis_pos(&shapes[first], axis) + axis_extent(&shapes[first], axis);
    for &i in &order[1..] {
        set_axis_pos(&mut shapes[i], axis, cursor + reference);
        cursor = axis_pos(&shapes[i], axis) + axis_extent(&shapes[i], axis);
    }
}

fn axis_pos(shape: &Shape, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => shape.position.x,
        Axis::Vertical => shape.position.y,
    }
}

fn axis_extent(shape: &Shape, axis: Axis) -> f64 {
    let size = shape.size();
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

fn set_axis_pos(shape: &mut Shape, axis: Axis, value: f64) {
    match axis {
        Axis::Horizontal => shape.position.x = value,
        Axis::Vertical => shape.position.y = value,
    }
    shape.touch();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use kurbo::Point;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::new(ShapeKind::Rectangle)
            .at(Point::new(x, y))
            .sized(w, h)
    }

    #[test]
    fn test_align_left() {
        let mut shapes = vec![rect(10.0, 0.0, 20.0, 20.0), rect(50.0, 40.0, 30.0, 30.0)];
        align(&mut shapes, Alignment::Left);
        assert_eq!(shapes[0].position.x, 10.0);
        assert_eq!(shapes[1].position.x, 10.0);
        // y untouched
        assert_eq!(shapes[1].position.y, 40.0);
    }

    #[test]
    fn test_align_right_accounts_for_width() {
        let mut shapes = vec![rect(0.0, 0.0, 20.0, 20.0), rect(50.0, 0.0, 30.0, 30.0)];
        align(&mut shapes, Alignment::Right);
        // Right edge of the group is at 80.
        assert_eq!(shapes[0].position.x, 60.0);
        assert_eq!(shapes[1].position.x, 50.0);
    }

    #[test]
    fn test_align_center() {
        let mut shapes = vec![rect(0.0, 0.0, 20.0, 20.0), rect(60.0, 0.0, 40.0, 40.0)];
        align(&mut shapes, Alignment::Center);
        // Group spans 0..100, center 50.
        assert_eq!(shapes[0].position.x, 40.0);
        assert_eq!(shapes[1].position.x, 30.0);
    }

    #[test]
    fn test_align_middle_vertical() {
        let mut shapes = vec![rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 90.0, 10.0, 10.0)];
        align(&mut shapes, Alignment::Middle);
        // Group spans 0..100 vertically, center 50.
        assert_eq!(shapes[0].position.y, 45.0);
        assert_eq!(shapes[1].position.y, 45.0);
    }

    #[test]
    fn test_align_single_shape_noop() {
        let mut shapes = vec![rect(10.0, 10.0, 20.0, 20.0)];
        align(&mut shapes, Alignment::Left);
        assert_eq!(shapes[0].position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_align_idempotent() {
        let mut shapes = vec![rect(10.0, 0.0, 20.0, 20.0), rect(50.0, 40.0, 30.0, 30.0)];
        align(&mut shapes, Alignment::Left);
        let positions: Vec<Point> = shapes.iter().map(|s| s.position).collect();
        align(&mut shapes, Alignment::Left);
        let again: Vec<Point> = shapes.iter().map(|s| s.position).collect();
        assert_eq!(positions, again);
    }

    #[test]
    fn test_distribute_even_gaps() {
        // 3 shapes of width 10 at x = 0, 50, 100: interior space is
        // 100 - 10 - 10 = 80, so both gaps are 40 and the middle lands at 50.
        let mut shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            rect(50.0, 0.0, 10.0, 10.0),
            rect(100.0, 0.0, 10.0, 10.0),
        ];
        distribute(&mut shapes, Axis::Horizontal);
        assert_eq!(shapes[0].position.x, 0.0);
        assert_eq!(shapes[1].position.x, 50.0);
        assert_eq!(shapes[2].position.x, 100.0);
    }

    #[test]
    fn test_distribute_uneven_input() {
        let mut shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            rect(12.0, 0.0, 10.0, 10.0),
            rect(100.0, 0.0, 10.0, 10.0),
        ];
        distribute(&mut shapes, Axis::Horizontal);
        // Same geometry as the even case: the middle shape must land at 50.
        assert_eq!(shapes[1].position.x, 50.0);
    }

    #[test]
    fn test_distribute_preserves_endpoints() {
        let mut shapes = vec![
            rect(0.0, 20.0, 10.0, 10.0),
            rect(5.0, 0.0, 10.0, 20.0),
            rect(3.0, 200.0, 10.0, 10.0),
            rect(7.0, 90.0, 10.0, 30.0),
        ];
        distribute(&mut shapes, Axis::Vertical);
        // First (y=0) and last (y=200) stay put.
        assert_eq!(shapes[1].position.y, 0.0);
        assert_eq!(shapes[2].position.y, 200.0);
        // Interior space: 200 - 20 = 180; middles occupy 10 + 30 = 40;
        // three gaps of (180-40)/3.
        let gap = (180.0 - 40.0) / 3.0;
        assert!((shapes[0].position.y - (20.0 + gap)).abs() < 1e-9);
        assert!((shapes[3].position.y - (20.0 + gap + 10.0 + gap)).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_two_shapes_noop() {
        let mut shapes = vec![rect(0.0, 0.0, 10.0, 10.0), rect(17.0, 0.0, 10.0, 10.0)];
        distribute(&mut shapes, Axis::Horizontal);
        assert_eq!(shapes[1].position.x, 17.0);
    }

    #[test]
    fn test_create_grid() {
        let mut shapes = vec![
            rect(40.0, 30.0, 10.0, 10.0),
            rect(0.0, 100.0, 10.0, 10.0),
            rect(200.0, 50.0, 10.0, 10.0),
            rect(70.0, 80.0, 10.0, 10.0),
        ];
        create_grid(&mut shapes, 2, 5.0);
        // Anchor is (0, 30); cell pitch is 15 for these 10x10 shapes.
        assert_eq!(shapes[0].position, Point::new(0.0, 30.0));
        assert_eq!(shapes[1].position, Point::new(15.0, 30.0));
        assert_eq!(shapes[2].position, Point::new(0.0, 45.0));
        assert_eq!(shapes[3].position, Point::new(15.0, 45.0));
    }

    #[test]
    fn test_create_grid_zero_columns_noop() {
        let mut shapes = vec![rect(1.0, 2.0, 10.0, 10.0)];
        create_grid(&mut shapes, 0, 5.0);
        assert_eq!(shapes[0].position, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_match_spacing() {
        let mut shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            rect(100.0, 0.0, 20.0, 10.0),
            rect(30.0, 0.0, 10.0, 10.0),
        ];
        match_spacing(&mut shapes, 5.0, Axis::Horizontal);
        // Sorted: x=0 (w10), x=30 (w10), x=100 (w20). Re-placed with 5px gaps.
        assert_eq!(shapes[0].position.x, 0.0);
        assert_eq!(shapes[2].position.x, 15.0);
        assert_eq!(shapes[1].position.x, 30.0);
    }
}
