//! Connections (edges) between shapes.

use crate::shapes::{ShapeId, ShapeStyle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for connections.
pub type ConnectionId = Uuid;

/// A directed link between two shapes.
///
/// A connection only references its endpoints by id; the document removes
/// connections when either endpoint shape is deleted, and does not otherwise
/// enforce referential integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub(crate) id: ConnectionId,
    /// Source shape id.
    pub source: ShapeId,
    /// Target shape id.
    pub target: ShapeId,
    /// Optional attachment handle on the source shape.
    #[serde(default)]
    pub source_handle: Option<String>,
    /// Optional attachment handle on the target shape.
    #[serde(default)]
    pub target_handle: Option<String>,
    /// Stroke style.
    #[serde(default)]
    pub style: ShapeStyle,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Selection flag.
    #[serde(default)]
    pub selected: bool,
}

impl Connection {
    /// Create a connection between two shapes.
    pub fn new(source: ShapeId, target: ShapeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            source_handle: None,
            target_handle: None,
            style: ShapeStyle::default(),
            label: String::new(),
            selected: false,
        }
    }

    /// Builder-style label setter.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder-style handle setter.
    pub fn with_handles(
        mut self,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Self {
        self.source_handle = source_handle;
        self.target_handle = target_handle;
        self
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether this connection touches the given shape.
    pub fn touches(&self, shape_id: ShapeId) -> bool {
        self.source == shape_id || self.target == shape_id
    }

    /// Give the connection a fresh identity (used when pasting).
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }
}
