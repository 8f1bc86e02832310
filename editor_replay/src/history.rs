//! Undo/redo history
//!
//! Every mutating command is recorded together with the buffer state it was
//! applied to. Undo restores that state verbatim; redo re-runs the command.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::buffer::{Buffer, Selection};
use crate::command::Command;

/// Text and selection captured before a mutating command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferState {
    pub text: String,
    pub selection: Option<Selection>,
}

impl BufferState {
    pub fn capture(buffer: &Buffer) -> Self {
        Self {
            text: buffer.text().to_string(),
            selection: buffer.selection(),
        }
    }

    fn restore_into(self, buffer: &mut Buffer) {
        buffer.restore(self.text, self.selection);
    }
}

/// A recorded command and the state it was applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command: Command,
    pub pre_state: BufferState,
}

/// Undo and redo stacks for one session
///
/// Undone commands keep no state on the redo stack; redo re-captures the
/// pre-state when it re-applies them.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<Command>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo entries, evicting the oldest
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a fresh mutating command; discards the redo branch
    pub fn record(&mut self, command: Command, pre_state: BufferState) {
        self.push_undo(HistoryEntry { command, pre_state });
        self.redo_stack.clear();
    }

    /// Restore the buffer to the state before the most recent command
    pub fn undo(&mut self, buffer: &mut Buffer) -> bool {
        let Some(HistoryEntry { command, pre_state }) = self.undo_stack.pop_back() else {
            return false;
        };
        pre_state.restore_into(buffer);
        trace!(key = %command.key(), "undo");
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command through `replay`
    ///
    /// The command is recorded again like a fresh mutation, so the rest of the
    /// redo stack is discarded.
    pub fn redo<F>(&mut self, buffer: &mut Buffer, replay: F) -> bool
    where
        F: FnOnce(&mut Buffer, &Command),
    {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        let pre_state = BufferState::capture(buffer);
        replay(buffer, &command);
        trace!(key = %command.key(), "redo");
        self.record(command, pre_state);
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push_back(entry);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }
}
