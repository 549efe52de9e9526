//! Tool system: active-tool state machine and the drawing session.

use crate::geometry::distance;
use crate::shapes::{Shape, ShapeKind, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum width of a drawn arrow.
pub const ARROW_MIN_WIDTH: f64 = 40.0;
/// Minimum height of a drawn arrow.
pub const ARROW_MIN_HEIGHT: f64 = 20.0;
/// Arrowhead size recorded in the shape payload.
pub const ARROW_HEAD_SIZE: f64 = 15.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Freehand,
    Dimension,
    Move,
    Measure,
}

impl ToolKind {
    /// The shape kind this tool draws, if it is a drawing tool with
    /// two-point geometry.
    fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Arrow => Some(ShapeKind::Arrow),
            _ => None,
        }
    }
}

/// State of the drawing session nested inside the active tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// No session in progress.
    #[default]
    Idle,
    /// A shape is being dragged out from `start`.
    Active { start: Point },
}

/// Active-tool state machine with an embedded drawing session.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    tool: ToolKind,
    state: ToolState,
    /// Style applied to newly drawn shapes.
    pub current_style: ShapeStyle,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch the active tool. Always cancels an unfinished drawing session.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a drawing session at `point`. Ignored while the select tool
    /// is active.
    pub fn start_drawing(&mut self, point: Point) {
        if self.tool == ToolKind::Select {
            return;
        }
        self.state = ToolState::Active { start: point };
    }

    /// Finish the session and produce a shape per the tool's geometry rules.
    ///
    /// Returns `None` when no session is active, or when the active tool has
    /// no two-point shape geometry (text, freehand, dimension, move, measure).
    pub fn finish_drawing(&mut self, end: Point) -> Option<Shape> {
        let ToolState::Active { start } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;

        let kind = self.tool.shape_kind()?;
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let min_corner = Point::new(start.x.min(end.x), start.y.min(end.y));

        let mut shape = match kind {
            ShapeKind::Rectangle | ShapeKind::Line => {
                Shape::new(kind).at(min_corner).sized(dx, dy)
            }
            ShapeKind::Circle => {
                // The start-end segment is a diameter: radius = distance / 2,
                // bounding box centered on the segment midpoint.
                let diameter = distance(start, end);
                let radius = diameter / 2.0;
                let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
                Shape::new(kind)
                    .at(Point::new(mid.x - radius, mid.y - radius))
                    .sized(diameter, diameter)
            }
            ShapeKind::Arrow => {
                let mut arrow = Shape::new(kind)
                    .at(min_corner)
                    .sized(dx.max(ARROW_MIN_WIDTH), dy.max(ARROW_MIN_HEIGHT));
                arrow
                    .data
                    .extras
                    .insert("head".to_string(), serde_json::json!("arrow"));
                arrow
                    .data
                    .extras
                    .insert("tail".to_string(), serde_json::json!("none"));
                arrow
                    .data
                    .extras
                    .insert("head_size".to_string(), serde_json::json!(ARROW_HEAD_SIZE));
                arrow
            }
            _ => return None,
        };

        shape.data.style = self.current_style.clone();
        Some(shape)
    }

    /// Cancel the current drawing session.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Whether a drawing session is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Start point of the session, if one is active.
    pub fn start_point(&self) -> Option<Point> {
        match self.state {
            ToolState::Active { start } => Some(start),
            ToolState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_tool_never_starts_session() {
        let mut tools = ToolController::new();
        assert_eq!(tools.tool(), ToolKind::Select);
        tools.start_drawing(Point::new(0.0, 0.0));
        assert!(!tools.is_drawing());
        assert!(tools.finish_drawing(Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_rectangle_geometry() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Rectangle);
        tools.start_drawing(Point::new(100.0, 100.0));
        let shape = tools.finish_drawing(Point::new(40.0, 160.0)).unwrap();

        assert_eq!(shape.kind, ShapeKind::Rectangle);
        assert_eq!(shape.position, Point::new(40.0, 100.0));
        let size = shape.size();
        assert_eq!(size.width, 60.0);
        assert_eq!(size.height, 60.0);
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_circle_diameter_from_distance() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Circle);
        tools.start_drawing(Point::new(0.0, 0.0));
        // Distance 10 (3-4-5 doubled): diameter 10.
        let shape = tools.finish_drawing(Point::new(6.0, 8.0)).unwrap();

        let size = shape.size();
        assert!((size.width - 10.0).abs() < 1e-9);
        assert!((size.height - 10.0).abs() < 1e-9);
        // Bounding box is centered on the segment midpoint (3,4).
        assert!((shape.position.x - (3.0 - 5.0)).abs() < 1e-9);
        assert!((shape.position.y - (4.0 - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_minimum_size() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Arrow);
        tools.start_drawing(Point::new(0.0, 0.0));
        let shape = tools.finish_drawing(Point::new(5.0, 5.0)).unwrap();

        let size = shape.size();
        assert!(size.width >= ARROW_MIN_WIDTH);
        assert!(size.height >= ARROW_MIN_HEIGHT);
        assert_eq!(shape.data.extras["head"], serde_json::json!("arrow"));
        assert_eq!(shape.data.extras["head_size"], serde_json::json!(15.0));
    }

    #[test]
    fn test_arrow_keeps_large_delta() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Arrow);
        tools.start_drawing(Point::new(0.0, 0.0));
        let shape = tools.finish_drawing(Point::new(120.0, 60.0)).unwrap();
        let size = shape.size();
        assert_eq!(size.width, 120.0);
        assert_eq!(size.height, 60.0);
    }

    #[test]
    fn test_non_drawing_tool_yields_nothing() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Measure);
        tools.start_drawing(Point::new(0.0, 0.0));
        assert!(tools.is_drawing());
        assert!(tools.finish_drawing(Point::new(50.0, 50.0)).is_none());
        // The session still ends.
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_finish_while_idle_is_noop() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Line);
        assert!(tools.finish_drawing(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_tool_switch_cancels_session() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Rectangle);
        tools.start_drawing(Point::new(0.0, 0.0));
        assert!(tools.is_drawing());

        tools.set_tool(ToolKind::Line);
        assert!(!tools.is_drawing());
        assert!(tools.start_point().is_none());
        assert!(tools.finish_drawing(Point::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::Freehand);
        tools.start_drawing(Point::new(1.0, 2.0));
        assert_eq!(tools.start_point(), Some(Point::new(1.0, 2.0)));
        tools.cancel();
        assert!(!tools.is_drawing());
    }
}
