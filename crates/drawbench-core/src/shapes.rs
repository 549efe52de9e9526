//! Shape definitions for the canvas.

use chrono::{DateTime, Utc};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Size used when a shape carries no explicit size.
pub const DEFAULT_SHAPE_SIZE: Size = Size::new(80.0, 80.0);

/// Position used when a shape is created without one.
pub const DEFAULT_SHAPE_POSITION: Point = Point::new(100.0, 100.0);

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Style properties for shapes and connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// Kind of drawable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Freehand,
    Dimension,
}

impl ShapeKind {
    /// Lowercase name used in log messages and history labels.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
            ShapeKind::Freehand => "freehand",
            ShapeKind::Dimension => "dimension",
        }
    }
}

/// Free-form payload attached to a shape: label, style, and per-kind extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Style properties.
    #[serde(default)]
    pub style: ShapeStyle,
    /// Per-kind properties (arrowhead metadata, text content, ...).
    #[serde(default)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

/// Partial update for a shape's payload; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ShapeDataPatch {
    pub label: Option<String>,
    pub style: Option<ShapeStyle>,
    /// Extras are merged key-by-key rather than replaced wholesale.
    pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A positioned, sized drawable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// What the shape is.
    pub kind: ShapeKind,
    /// Top-left corner position in canvas units.
    pub position: Point,
    /// Size; `None` means the default 80x80.
    pub size: Option<Size>,
    /// Free-form payload.
    pub data: ShapeData,
    /// Selection flag.
    #[serde(default)]
    pub selected: bool,
    /// Layer name.
    pub layer: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub modified_at: DateTime<Utc>,
}

impl Shape {
    /// Create a shape with default position, size and payload.
    pub fn new(kind: ShapeKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            position: DEFAULT_SHAPE_POSITION,
            size: None,
            data: ShapeData::default(),
            selected: false,
            layer: "default".to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Builder-style size setter.
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Builder-style label setter.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.data.label = label.into();
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Effective size, falling back to the 80x80 default.
    pub fn size(&self) -> Size {
        self.size.unwrap_or(DEFAULT_SHAPE_SIZE)
    }

    /// Axis-aligned bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        let size = self.size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + size.width,
            self.position.y + size.height,
        )
    }

    /// Move the shape by a delta and refresh its modification timestamp.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.touch();
    }

    /// Merge a partial payload update into the shape.
    pub fn apply_patch(&mut self, patch: ShapeDataPatch) {
        if let Some(label) = patch.label {
            self.data.label = label;
        }
        if let Some(style) = patch.style {
            self.data.style = style;
        }
        if let Some(extras) = patch.extras {
            for (key, value) in extras {
                self.data.extras.insert(key, value);
            }
        }
        self.touch();
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Give the shape a fresh identity (used when duplicating or pasting).
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Reset both timestamps to now (used when pasting).
    pub(crate) fn refresh_timestamps(&mut self) {
        let now = Utc::now();
        self.created_at = now;
        self.modified_at = now;
    }
}
