//! Undo/redo history management.
//!
//! Snapshots are immutable and shared, so history is just a pair of stacks
//! of `Arc<Snapshot>`.

use crate::Snapshot;
use std::collections::VecDeque;
use std::sync::Arc;

/// Manages undo/redo history using snapshot-based approach.
///
/// Before each applied mutation, the store pushes the outgoing snapshot with
/// `capture_before_command`.
#[derive(Debug, Default)]
pub struct HistoryManager {
    /// Most recent = back of deque.
    undo_stack: VecDeque<Arc<Snapshot>>,
    /// Most recent = back of deque.
    redo_stack: VecDeque<Arc<Snapshot>>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the state that a command is about to replace.
    ///
    /// Any new action after an undo invalidates the redo history.
    pub fn capture_before_command(&mut self, snapshot: Arc<Snapshot>) {
        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();
    }

    pub fn pop_undo(&mut self) -> Option<Arc<Snapshot>> {
        self.undo_stack.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<Arc<Snapshot>> {
        self.redo_stack.pop_back()
    }

    /// Push current state to redo stack (before applying undo).
    pub fn push_redo(&mut self, snapshot: Arc<Snapshot>) {
        self.redo_stack.push_back(snapshot);
    }

    /// Push current state to undo stack (before applying redo).
    pub fn push_undo(&mut self, snapshot: Arc<Snapshot>) {
        self.undo_stack.push_back(snapshot);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
