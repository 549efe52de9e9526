//! Canvas document: shape and connection collections plus element operations.

use crate::connection::{Connection, ConnectionId};
use crate::shapes::{Shape, ShapeDataPatch, ShapeId};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Offset applied to duplicated and pasted shapes.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// A full copy of the document's collections at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    shapes: HashMap<ShapeId, Shape>,
    shape_order: Vec<ShapeId>,
    connections: HashMap<ConnectionId, Connection>,
    connection_order: Vec<ConnectionId>,
}

/// Transient holding area for copied shapes and connections.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    shapes: Vec<Shape>,
    connections: Vec<Connection>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connections.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.connections.clear();
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.shapes.len() + self.connections.len()
    }
}

/// A canvas document containing all shapes and connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes, keyed by id.
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of shapes (back to front).
    shape_order: Vec<ShapeId>,
    /// All connections, keyed by id.
    connections: HashMap<ConnectionId, Connection>,
    /// Insertion order of connections.
    connection_order: Vec<ConnectionId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            shape_order: Vec::new(),
            connections: HashMap::new(),
            connection_order: Vec::new(),
        }
    }

    // ---- snapshots -------------------------------------------------------

    /// Copy the current collections.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            shapes: self.shapes.clone(),
            shape_order: self.shape_order.clone(),
            connections: self.connections.clone(),
            connection_order: self.connection_order.clone(),
        }
    }

    /// Replace the live collections with a snapshot. No diffing or merging.
    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.shapes = snapshot.shapes;
        self.shape_order = snapshot.shape_order;
        self.connections = snapshot.connections;
        self.connection_order = snapshot.connection_order;
    }

    // ---- shape CRUD ------------------------------------------------------

    /// Add a shape to the document. Returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shape_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape and every connection touching it.
    /// Returns the removed shape, or `None` if the id is unknown.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.shape_order.retain(|&shape_id| shape_id != id);

        let dangling: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.touches(id))
            .map(|c| c.id())
            .collect();
        for conn_id in dangling {
            self.connections.remove(&conn_id);
            self.connection_order.retain(|&cid| cid != conn_id);
        }

        Some(removed)
    }

    /// Merge a partial payload update into a shape, refreshing its
    /// modification timestamp. No-op if the id is unknown.
    pub fn update_shape_data(&mut self, id: ShapeId, patch: ShapeDataPatch) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Clone a shape with a fresh id, offset by (+20,+20).
    /// Returns the new shape's id, or `None` if the source id is unknown.
    pub fn duplicate_shape(&mut self, id: ShapeId) -> Option<ShapeId> {
        let mut clone = self.shapes.get(&id)?.clone();
        clone.regenerate_id();
        clone.translate(DUPLICATE_OFFSET);
        Some(self.add_shape(clone))
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Shapes in insertion order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.shape_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shapes in insertion order, as an owned list.
    pub fn shapes_vec(&self) -> Vec<Shape> {
        self.shapes_ordered().cloned().collect()
    }

    // ---- connection CRUD -------------------------------------------------

    /// Add a connection. Endpoint existence is not checked; cleanup happens
    /// when an endpoint shape is deleted.
    pub fn add_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = connection.id();
        self.connection_order.push(id);
        self.connections.insert(id, connection);
        id
    }

    /// Remove a connection by id.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let removed = self.connections.remove(&id)?;
        self.connection_order.retain(|&cid| cid != id);
        Some(removed)
    }

    pub fn get_connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// Connections in insertion order.
    pub fn connections_ordered(&self) -> impl Iterator<Item = &Connection> {
        self.connection_order
            .iter()
            .filter_map(|id| self.connections.get(id))
    }

    /// Connections in insertion order, as an owned list.
    pub fn connections_vec(&self) -> Vec<Connection> {
        self.connections_ordered().cloned().collect()
    }

    // ---- selection -------------------------------------------------------

    /// Set every shape's selection flag.
    pub fn select_all(&mut self) {
        for shape in self.shapes.values_mut() {
            shape.selected = true;
        }
    }

    /// Clear the selection flag on every shape and connection.
    pub fn clear_selection(&mut self) {
        for shape in self.shapes.values_mut() {
            shape.selected = false;
        }
        for connection in self.connections.values_mut() {
            connection.selected = false;
        }
    }

    /// Selected shapes in insertion order.
    pub fn selected_shapes(&self) -> Vec<Shape> {
        self.shapes_ordered().filter(|s| s.selected).cloned().collect()
    }

    /// Selected connections in insertion order.
    pub fn selected_connections(&self) -> Vec<Connection> {
        self.connections_ordered()
            .filter(|c| c.selected)
            .cloned()
            .collect()
    }

    // ---- clipboard -------------------------------------------------------

    /// Copy the current selection into the clipboard.
    /// Returns the number of items copied (0 when nothing is selected).
    pub fn copy_selected(&self, clipboard: &mut Clipboard) -> usize {
        let shapes = self.selected_shapes();
        let connections = self.selected_connections();
        if shapes.is_empty() && connections.is_empty() {
            return 0;
        }
        clipboard.shapes = shapes;
        clipboard.connections = connections;
        clipboard.len()
    }

    /// Paste the clipboard contents: fresh ids, shapes offset by (+20,+20)
    /// from their originals, everything marked selected, timestamps reset.
    /// The existing selection is cleared first. An empty clipboard pastes
    /// nothing and returns empty lists.
    pub fn paste(&mut self, clipboard: &Clipboard) -> (Vec<Shape>, Vec<Connection>) {
        if clipboard.is_empty() {
            return (Vec::new(), Vec::new());
        }

        self.clear_selection();

        let mut new_shapes = Vec::with_capacity(clipboard.shapes.len());
        for original in &clipboard.shapes {
            let mut shape = original.clone();
            shape.regenerate_id();
            shape.translate(DUPLICATE_OFFSET);
            shape.selected = true;
            shape.refresh_timestamps();
            new_shapes.push(shape.clone());
            self.add_shape(shape);
        }

        let mut new_connections = Vec::with_capacity(clipboard.connections.len());
        for original in &clipboard.connections {
            let mut connection = original.clone();
            connection.regenerate_id();
            connection.selected = true;
            new_connections.push(connection.clone());
            self.add_connection(connection);
        }

        (new_shapes, new_connections)
    }

    /// Copy the selection to the clipboard, then delete it.
    /// Returns the number of items copied.
    pub fn cut_selected(&mut self, clipboard: &mut Clipboard) -> usize {
        let copied = self.copy_selected(clipboard);
        if copied == 0 {
            return 0;
        }
        let shape_ids: Vec<ShapeId> = clipboard.shapes.iter().map(|s| s.id()).collect();
        let connection_ids: Vec<ConnectionId> =
            clipboard.connections.iter().map(|c| c.id()).collect();
        for id in shape_ids {
            self.remove_shape(id);
        }
        for id in connection_ids {
            self.remove_connection(id);
        }
        copied
    }

    // ---- misc ------------------------------------------------------------

    /// Remove everything from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.shape_order.clear();
        self.connections.clear();
        self.connection_order.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connections.is_empty()
    }

    /// Number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use kurbo::Point;

    fn rect_at(x: f64, y: f64) -> Shape {
        Shape::new(ShapeKind::Rectangle)
            .at(Point::new(x, y))
            .sized(50.0, 50.0)
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut doc = Document::new();
        let id = doc.add_shape(rect_at(0.0, 0.0));
        assert_eq!(doc.shape_count(), 1);
        assert!(doc.remove_shape(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove_shape(id).is_none());
    }

    #[test]
    fn test_remove_shape_cleans_connections() {
        let mut doc = Document::new();
        let a = doc.add_shape(rect_at(0.0, 0.0));
        let b = doc.add_shape(rect_at(100.0, 0.0));
        let c = doc.add_shape(rect_at(200.0, 0.0));
        doc.add_connection(Connection::new(a, b));
        doc.add_connection(Connection::new(b, c));
        let survivor = doc.add_connection(Connection::new(a, c));

        doc.remove_shape(b);

        assert_eq!(doc.connection_count(), 1);
        assert!(doc.get_connection(survivor).is_some());
    }

    #[test]
    fn test_update_shape_data() {
        let mut doc = Document::new();
        let id = doc.add_shape(rect_at(0.0, 0.0));
        let before = doc.get_shape(id).unwrap().modified_at;

        let ok = doc.update_shape_data(
            id,
            ShapeDataPatch {
                label: Some("pump".to_string()),
                ..Default::default()
            },
        );
        assert!(ok);
        let shape = doc.get_shape(id).unwrap();
        assert_eq!(shape.data.label, "pump");
        assert!(shape.modified_at >= before);

        assert!(!doc.update_shape_data(Uuid::new_v4(), ShapeDataPatch::default()));
    }

    #[test]
    fn test_duplicate_shape_offsets() {
        let mut doc = Document::new();
        let id = doc.add_shape(rect_at(10.0, 10.0));
        let dup_id = doc.duplicate_shape(id).unwrap();

        assert_ne!(dup_id, id);
        let dup = doc.get_shape(dup_id).unwrap();
        assert_eq!(dup.position, Point::new(30.0, 30.0));
        assert_eq!(doc.shape_count(), 2);
    }

    #[test]
    fn test_selection_flags() {
        let mut doc = Document::new();
        let a = doc.add_shape(rect_at(0.0, 0.0));
        let b = doc.add_shape(rect_at(100.0, 0.0));
        doc.add_connection(Connection::new(a, b));

        doc.select_all();
        assert_eq!(doc.selected_shapes().len(), 2);

        doc.clear_selection();
        assert!(doc.selected_shapes().is_empty());
        assert!(doc.selected_connections().is_empty());
    }

    #[test]
    fn test_copy_paste_cycle() {
        let mut doc = Document::new();
        let id = doc.add_shape(rect_at(5.0, 5.0));
        doc.get_shape_mut(id).unwrap().selected = true;

        let mut clipboard = Clipboard::new();
        assert_eq!(doc.copy_selected(&mut clipboard), 1);

        let (shapes, connections) = doc.paste(&clipboard);
        assert_eq!(shapes.len(), 1);
        assert!(connections.is_empty());
        assert_eq!(shapes[0].position, Point::new(25.0, 25.0));
        assert!(shapes[0].selected);
        assert_ne!(shapes[0].id(), id);
        // Paste clears the prior selection before selecting the new items.
        assert!(!doc.get_shape(id).unwrap().selected);
        assert_eq!(doc.shape_count(), 2);
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut doc = Document::new();
        let clipboard = Clipboard::new();
        let (shapes, connections) = doc.paste(&clipboard);
        assert!(shapes.is_empty());
        assert!(connections.is_empty());
    }

    #[test]
    fn test_copy_nothing_selected() {
        let mut doc = Document::new();
        doc.add_shape(rect_at(0.0, 0.0));
        let mut clipboard = Clipboard::new();
        assert_eq!(doc.copy_selected(&mut clipboard), 0);
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_cut_removes_selection() {
        let mut doc = Document::new();
        let a = doc.add_shape(rect_at(0.0, 0.0));
        let b = doc.add_shape(rect_at(100.0, 0.0));
        doc.get_shape_mut(a).unwrap().selected = true;

        let mut clipboard = Clipboard::new();
        assert_eq!(doc.cut_selected(&mut clipboard), 1);
        assert!(doc.get_shape(a).is_none());
        assert!(doc.get_shape(b).is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new();
        let a = doc.add_shape(rect_at(0.0, 0.0));
        let b = doc.add_shape(rect_at(100.0, 0.0));
        doc.add_connection(
            Connection::new(a, b)
                .labeled("feed")
                .with_handles(Some("right".to_string()), Some("left".to_string())),
        );

        let json = doc.to_json().unwrap();
        let restored = Document::from_json(&json).unwrap();
        assert_eq!(restored.shape_count(), 2);
        assert_eq!(restored.connection_count(), 1);
        let conn = &restored.connections_vec()[0];
        assert_eq!(conn.label, "feed");
        assert_eq!(conn.source_handle.as_deref(), Some("right"));
        assert_eq!(conn.target_handle.as_deref(), Some("left"));
    }
}
