//! Keyboard shortcut table and resolution.
//!
//! Keys arrive as strings in the form the host event loop reports them
//! ("z", "Escape", "Delete"). Matching is case-insensitive on single
//! letters so the table works with and without an active shift modifier.

use crate::tools::ToolKind;
use serde::Serialize;

/// One entry in the shortcut table, for discovery and help overlays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    /// Key name ("z", "Delete", "Escape").
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    /// Human-readable description.
    pub description: &'static str,
}

impl Shortcut {
    /// Render as "Ctrl+Shift+Z"-style text.
    pub fn format(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(if self.key.len() == 1 {
            self.key.to_uppercase()
        } else {
            self.key.to_string()
        });
        parts.join("+")
    }
}

/// Editor operation a shortcut maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    SelectAll,
    Delete,
    CancelDrawing,
    SetTool(ToolKind),
}

/// Static shortcut table.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Every registered shortcut, for display purposes.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut { key: "z", ctrl: true, shift: false, description: "Undo" },
            Shortcut { key: "z", ctrl: true, shift: true, description: "Redo" },
            Shortcut { key: "y", ctrl: true, shift: false, description: "Redo" },
            Shortcut { key: "c", ctrl: true, shift: false, description: "Copy" },
            Shortcut { key: "x", ctrl: true, shift: false, description: "Cut" },
            Shortcut { key: "v", ctrl: true, shift: false, description: "Paste" },
            Shortcut { key: "d", ctrl: true, shift: true, description: "Duplicate" },
            Shortcut { key: "a", ctrl: true, shift: false, description: "Select all" },
            Shortcut { key: "Delete", ctrl: false, shift: false, description: "Delete selection" },
            Shortcut { key: "Backspace", ctrl: false, shift: false, description: "Delete selection" },
            Shortcut { key: "Escape", ctrl: false, shift: false, description: "Cancel drawing" },
            Shortcut { key: "v", ctrl: false, shift: false, description: "Select tool" },
            Shortcut { key: "r", ctrl: false, shift: false, description: "Rectangle tool" },
            Shortcut { key: "c", ctrl: false, shift: false, description: "Circle tool" },
            Shortcut { key: "l", ctrl: false, shift: false, description: "Line tool" },
            Shortcut { key: "a", ctrl: false, shift: false, description: "Arrow tool" },
            Shortcut { key: "t", ctrl: false, shift: false, description: "Text tool" },
            Shortcut { key: "f", ctrl: false, shift: false, description: "Freehand tool" },
            Shortcut { key: "d", ctrl: false, shift: false, description: "Dimension tool" },
            Shortcut { key: "m", ctrl: false, shift: false, description: "Move tool" },
            Shortcut { key: "x", ctrl: false, shift: false, description: "Measure tool" },
        ]
    }

    /// Resolve a key event to an action. Returns `None` for unbound keys.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<EditorAction> {
        // Modifier chords take precedence over plain tool keys.
        if ctrl {
            return match (key.to_lowercase().as_str(), shift) {
                ("z", false) => Some(EditorAction::Undo),
                ("z", true) => Some(EditorAction::Redo),
                ("y", _) => Some(EditorAction::Redo),
                ("c", false) => Some(EditorAction::Copy),
                ("x", false) => Some(EditorAction::Cut),
                ("v", false) => Some(EditorAction::Paste),
                ("d", true) => Some(EditorAction::Duplicate),
                ("a", false) => Some(EditorAction::SelectAll),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => return Some(EditorAction::Delete),
            "Escape" => return Some(EditorAction::CancelDrawing),
            _ => {}
        }

        let tool = match key.to_lowercase().as_str() {
            "v" => ToolKind::Select,
            "r" => ToolKind::Rectangle,
            "c" => ToolKind::Circle,
            "l" => ToolKind::Line,
            "a" => ToolKind::Arrow,
            "t" => ToolKind::Text,
            "f" => ToolKind::Freehand,
            "d" => ToolKind::Dimension,
            "m" => ToolKind::Move,
            "x" => ToolKind::Measure,
            _ => return None,
        };
        Some(EditorAction::SetTool(tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(
            ShortcutRegistry::resolve("z", true, false),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            ShortcutRegistry::resolve("z", true, true),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            ShortcutRegistry::resolve("y", true, false),
            Some(EditorAction::Redo)
        );
    }

    #[test]
    fn test_clipboard_chords() {
        assert_eq!(
            ShortcutRegistry::resolve("c", true, false),
            Some(EditorAction::Copy)
        );
        assert_eq!(
            ShortcutRegistry::resolve("x", true, false),
            Some(EditorAction::Cut)
        );
        assert_eq!(
            ShortcutRegistry::resolve("v", true, false),
            Some(EditorAction::Paste)
        );
        assert_eq!(
            ShortcutRegistry::resolve("d", true, true),
            Some(EditorAction::Duplicate)
        );
    }

    #[test]
    fn test_ctrl_takes_precedence_over_tool_keys() {
        // Plain "c" activates the circle tool; Ctrl+C copies.
        assert_eq!(
            ShortcutRegistry::resolve("c", false, false),
            Some(EditorAction::SetTool(ToolKind::Circle))
        );
        assert_eq!(
            ShortcutRegistry::resolve("c", true, false),
            Some(EditorAction::Copy)
        );
    }

    #[test]
    fn test_delete_and_escape() {
        assert_eq!(
            ShortcutRegistry::resolve("Delete", false, false),
            Some(EditorAction::Delete)
        );
        assert_eq!(
            ShortcutRegistry::resolve("Backspace", false, false),
            Some(EditorAction::Delete)
        );
        assert_eq!(
            ShortcutRegistry::resolve("Escape", false, false),
            Some(EditorAction::CancelDrawing)
        );
    }

    #[test]
    fn test_case_insensitive_letters() {
        assert_eq!(
            ShortcutRegistry::resolve("R", false, false),
            Some(EditorAction::SetTool(ToolKind::Rectangle))
        );
        assert_eq!(
            ShortcutRegistry::resolve("Z", true, false),
            Some(EditorAction::Undo)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::resolve("q", false, false), None);
        assert_eq!(ShortcutRegistry::resolve("F5", false, false), None);
        assert_eq!(ShortcutRegistry::resolve("q", true, false), None);
    }

    #[test]
    fn test_format() {
        let undo = Shortcut { key: "z", ctrl: true, shift: false, description: "Undo" };
        assert_eq!(undo.format(), "Ctrl+Z");
        let redo = Shortcut { key: "z", ctrl: true, shift: true, description: "Redo" };
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
        let del = Shortcut { key: "Delete", ctrl: false, shift: false, description: "Delete" };
        assert_eq!(del.format(), "Delete");
    }
}
