//! DrawBench Core Library
//!
//! Platform-agnostic editing model for the DrawBench diagram canvas:
//! documents of shapes and connections, snapshot-based undo history,
//! drawing tools, object snapping, and alignment operations.

pub mod align;
pub mod connection;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod shapes;
pub mod shortcuts;
pub mod snap;
pub mod storage;
pub mod tools;

pub use align::{Alignment, Axis, align, create_grid, distribute, match_spacing};
pub use connection::{Connection, ConnectionId};
pub use document::{Clipboard, Document, DocumentSnapshot, DUPLICATE_OFFSET};
pub use editor::Editor;
pub use geometry::SelectionBounds;
pub use history::{History, HistoryEntry, HistoryInfo, MAX_HISTORY};
pub use shapes::{
    Shape, ShapeData, ShapeDataPatch, ShapeId, ShapeKind, ShapeStyle, SerializableColor,
    DEFAULT_SHAPE_POSITION, DEFAULT_SHAPE_SIZE,
};
pub use shortcuts::{EditorAction, Shortcut, ShortcutRegistry};
pub use snap::{
    ObjectSnap, SnapOutcome, SnapPoint, SnapPointKind, SnapSettings, SnapSettingsPatch,
    SnapSource, DEFAULT_GRID_SIZE, DEFAULT_SNAP_DISTANCE,
};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{ToolController, ToolKind, ToolState};
