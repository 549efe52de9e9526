//! Bounded, branch-free undo/redo log of full document snapshots.

use crate::document::{Document, DocumentSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// One full snapshot of the canvas state, tagged with an action label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// When the entry was captured.
    pub timestamp: DateTime<Utc>,
    /// Human-readable action label ("Add rectangle", "Align left", ...).
    pub label: String,
    snapshot: DocumentSnapshot,
}

/// Read-only summary of the history state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryInfo {
    /// Total entries in the log.
    pub total: usize,
    /// Current position in the log (-1 when empty).
    pub position: isize,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Label of the entry at the current position.
    pub last_action: Option<String>,
}

/// Linear undo/redo log over full-document snapshots.
///
/// Entries are stored in insertion order. A new `save_state` discards any
/// entries past the current position (a new action invalidates the redo
/// branch) and the log is capped at [`MAX_HISTORY`] entries, evicting the
/// oldest.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Index of the entry matching the live document, -1 when empty.
    current: isize,
    /// Set while a snapshot is being restored, so the restore itself
    /// cannot record a spurious entry.
    restoring: bool,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: -1,
            restoring: false,
        }
    }

    /// Capture the document's present collections as a new entry.
    /// No-op while a restore is in progress.
    pub fn save_state(&mut self, label: impl Into<String>, document: &Document) {
        if self.restoring {
            return;
        }
        let label = label.into();

        // A new action invalidates everything past the current position.
        self.entries.truncate((self.current + 1) as usize);

        self.entries.push(HistoryEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            label: label.clone(),
            snapshot: document.snapshot(),
        });
        self.current = self.entries.len() as isize - 1;

        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
            self.current -= 1;
        }

        log::debug!(
            "history: saved '{}' ({} entries, position {})",
            label,
            self.entries.len(),
            self.current
        );
    }

    /// Restore the previous entry into the document.
    /// Returns false at the start of the log.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        if self.current <= 0 {
            return false;
        }
        let snapshot = self.entries[(self.current - 1) as usize].snapshot.clone();
        self.restoring = true;
        document.restore(snapshot);
        self.restoring = false;
        self.current -= 1;
        log::debug!("history: undo to position {}", self.current);
        true
    }

    /// Restore the next entry into the document.
    /// Returns false at the end of the log.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        if self.current >= self.entries.len() as isize - 1 {
            return false;
        }
        let snapshot = self.entries[(self.current + 1) as usize].snapshot.clone();
        self.restoring = true;
        document.restore(snapshot);
        self.restoring = false;
        self.current += 1;
        log::debug!("history: redo to position {}", self.current);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current < self.entries.len() as isize - 1
    }

    /// Empty the log.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = -1;
    }

    /// Read-only summary of the log.
    pub fn info(&self) -> HistoryInfo {
        HistoryInfo {
            total: self.entries.len(),
            position: self.current,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            last_action: if self.current >= 0 {
                Some(self.entries[self.current as usize].label.clone())
            } else {
                None
            },
        }
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
