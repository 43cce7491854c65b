//! Linear undo/redo history
//!
//! An ordered list of snapshots with a single cursor. Pushing a new
//! snapshot after undoing discards everything ahead of the cursor, so the
//! history never branches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditHistory<T> {
    entries: Vec<T>,
    /// Index of the current snapshot, `None` while empty
    cursor: Option<usize>,
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }
}

impl<T: Clone> EditHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot, dropping any redo entries
    pub fn add_state(&mut self, state: &T) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(state.clone());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one snapshot and return a copy of it
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor).cloned()
    }

    /// Step forward one snapshot and return a copy of it
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(cursor);
        self.entries.get(cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.pointer() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer() < self.entries.len() as isize - 1
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Copy of the snapshot under the cursor
    pub fn current(&self) -> Option<T> {
        self.cursor.and_then(|c| self.entries.get(c)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, -1 when the history is empty
    pub fn pointer(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Pull a cursor loaded from storage back into range
    pub fn repair(&mut self) {
        self.cursor = match (self.cursor, self.entries.len()) {
            (_, 0) => None,
            (None, len) => Some(len - 1),
            (Some(c), len) => Some(c.min(len - 1)),
        };
    }
}
