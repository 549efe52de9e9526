//! Editor session: wires the document, history, tools, snap and clipboard
//! together, taking a history snapshot around every committed change.

use crate::align::{self, Alignment, Axis};
use crate::connection::{Connection, ConnectionId};
use crate::document::{Clipboard, Document};
use crate::history::{History, HistoryInfo};
use crate::shapes::{Shape, ShapeDataPatch, ShapeId};
use crate::snap::{ObjectSnap, SnapOutcome, SnapSettings, SnapSettingsPatch};
use crate::tools::{ToolController, ToolKind};
use kurbo::Point;

/// Owns one editing session's state.
///
/// Every operation that changes the document records a history entry after
/// applying the change, so the entry at the current position always matches
/// the live collections and undo restores the state observed just before
/// the mutation.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    history: History,
    tools: ToolController,
    snap: ObjectSnap,
    clipboard: Clipboard,
}

impl Editor {
    /// Create an editor over an empty document.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create an editor over an existing document.
    pub fn with_document(document: Document) -> Self {
        let mut editor = Self {
            document,
            history: History::new(),
            tools: ToolController::new(),
            snap: ObjectSnap::new(),
            clipboard: Clipboard::new(),
        };
        editor.history.save_state("Open document", &editor.document);
        editor
    }

    // ---- document access -------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Replace the document wholesale, resetting history to a new baseline.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.history.save_state("Open document", &self.document);
        log::info!("editor: opened document '{}'", self.document.name);
    }

    // ---- element operations ----------------------------------------------

    /// Add a shape and record a history entry. Returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let label = format!("Add {}", shape.kind.name());
        let id = self.document.add_shape(shape);
        self.history.save_state(label, &self.document);
        id
    }

    /// Delete a shape (and its connections). Returns false for unknown ids.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        match self.document.remove_shape(id) {
            Some(shape) => {
                self.history
                    .save_state(format!("Delete {}", shape.kind.name()), &self.document);
                true
            }
            None => false,
        }
    }

    /// Delete every selected shape and connection.
    /// Returns the number of items removed.
    pub fn delete_selected(&mut self) -> usize {
        let shape_ids: Vec<ShapeId> = self
            .document
            .selected_shapes()
            .iter()
            .map(|s| s.id())
            .collect();
        let connection_ids: Vec<ConnectionId> = self
            .document
            .selected_connections()
            .iter()
            .map(|c| c.id())
            .collect();

        let mut removed = 0;
        for id in connection_ids {
            if self.document.remove_connection(id).is_some() {
                removed += 1;
            }
        }
        for id in shape_ids {
            // remove_shape may already have dropped dependent connections.
            if self.document.remove_shape(id).is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            self.history.save_state("Delete selection", &self.document);
            log::debug!("editor: deleted {removed} selected items");
        }
        removed
    }

    /// Merge a payload patch into a shape. Returns false for unknown ids.
    pub fn update_shape(&mut self, id: ShapeId, patch: ShapeDataPatch) -> bool {
        if self.document.update_shape_data(id, patch) {
            self.history.save_state("Update shape", &self.document);
            true
        } else {
            false
        }
    }

    /// Duplicate a shape with a (+20,+20) offset.
    pub fn duplicate_shape(&mut self, id: ShapeId) -> Option<ShapeId> {
        let new_id = self.document.duplicate_shape(id)?;
        self.history.save_state("Duplicate shape", &self.document);
        Some(new_id)
    }

    /// Add a connection between two shapes.
    pub fn add_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = self.document.add_connection(connection);
        self.history.save_state("Add connection", &self.document);
        id
    }

    pub fn select_all(&mut self) {
        self.document.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.document.clear_selection();
    }

    // ---- clipboard -------------------------------------------------------

    /// Copy the selection to the clipboard. Returns the count copied.
    pub fn copy_selected(&mut self) -> usize {
        self.document.copy_selected(&mut self.clipboard)
    }

    /// Paste the clipboard. Returns the newly inserted items.
    pub fn paste(&mut self) -> (Vec<Shape>, Vec<Connection>) {
        let (shapes, connections) = self.document.paste(&self.clipboard);
        if !shapes.is_empty() || !connections.is_empty() {
            self.history.save_state("Paste", &self.document);
        }
        (shapes, connections)
    }

    /// Cut the selection. Returns the count copied.
    pub fn cut_selected(&mut self) -> usize {
        let count = self.document.cut_selected(&mut self.clipboard);
        if count > 0 {
            self.history.save_state("Cut", &self.document);
        }
        count
    }

    // ---- tools -----------------------------------------------------------

    pub fn tool(&self) -> ToolKind {
        self.tools.tool()
    }

    /// Switch the active tool, cancelling any drawing in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    /// Begin a drawing session (ignored under the select tool).
    pub fn start_drawing(&mut self, point: Point) {
        self.tools.start_drawing(point);
    }

    /// Finish the drawing session, committing the drawn shape to the
    /// document. Returns the new shape's id, or `None` when nothing was
    /// produced.
    pub fn finish_drawing(&mut self, end: Point) -> Option<ShapeId> {
        let shape = self.tools.finish_drawing(end)?;
        let label = format!("Draw {}", shape.kind.name());
        let id = self.document.add_shape(shape);
        self.history.save_state(label, &self.document);
        Some(id)
    }

    pub fn cancel_drawing(&mut self) {
        self.tools.cancel();
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_drawing()
    }

    // ---- snap ------------------------------------------------------------

    /// Resolve a pointer position against the document's shapes.
    pub fn snapped_position(&self, target: Point, exclude: Option<ShapeId>) -> SnapOutcome {
        let shapes = self.document.shapes_vec();
        self.snap.snapped_position(target, &shapes, exclude)
    }

    pub fn snap_settings(&self) -> SnapSettings {
        self.snap.settings()
    }

    pub fn update_snap_settings(&mut self, patch: SnapSettingsPatch) {
        self.snap.update_settings(patch);
    }

    // ---- history ---------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let ok = self.history.undo(&mut self.document);
        if ok {
            log::info!("editor: undo");
        }
        ok
    }

    pub fn redo(&mut self) -> bool {
        let ok = self.history.redo(&mut self.document);
        if ok {
            log::info!("editor: redo");
        }
        ok
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_info(&self) -> HistoryInfo {
        self.history.info()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ---- alignment over the selection ------------------------------------

    /// Align the selected shapes. Returns false (no history entry) when
    /// fewer than 2 shapes are selected.
    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        let mut selection = self.document.selected_shapes();
        if selection.len() < 2 {
            return false;
        }
        align::align(&mut selection, alignment);
        self.write_back(selection);
        self.history
            .save_state(format!("Align {}", alignment_name(alignment)), &self.document);
        true
    }

    /// Distribute the selected shapes with equal gaps. Returns false when
    /// fewer than 3 shapes are selected.
    pub fn distribute_selected(&mut self, axis: Axis) -> bool {
        let mut selection = self.document.selected_shapes();
        if selection.len() < 3 {
            return false;
        }
        align::distribute(&mut selection, axis);
        self.write_back(selection);
        self.history
            .save_state(format!("Distribute {}", axis_name(axis)), &self.document);
        true
    }

    /// Lay the selected shapes out on a grid.
    pub fn grid_selected(&mut self, columns: usize, spacing: f64) -> bool {
        let mut selection = self.document.selected_shapes();
        if selection.is_empty() || columns == 0 {
            return false;
        }
        align::create_grid(&mut selection, columns, spacing);
        self.write_back(selection);
        self.history.save_state("Arrange in grid", &self.document);
        true
    }

    /// Re-space the selected shapes to a fixed gap.
    pub fn match_spacing_selected(&mut self, reference: f64, axis: Axis) -> bool {
        let mut selection = self.document.selected_shapes();
        if selection.len() < 2 {
            return false;
        }
        align::match_spacing(&mut selection, reference, axis);
        self.write_back(selection);
        self.history.save_state("Match spacing", &self.document);
        true
    }

    /// Write repositioned selection clones back into the document.
    fn write_back(&mut self, shapes: Vec<Shape>) {
        for shape in shapes {
            if let Some(live) = self.document.get_shape_mut(shape.id()) {
                live.position = shape.position;
                live.modified_at = shape.modified_at;
            }
        }
    }
}

fn alignment_name(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Right => "right",
        Alignment::Center => "center",
        Alignment::Top => "top",
        Alignment::Bottom => "bottom",
        Alignment::Middle => "middle",
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Horizontal => "horizontally",
        Axis::Vertical => "vertically",
    }
}
