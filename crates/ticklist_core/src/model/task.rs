//! Task and subtask domain records.
//!
//! # Responsibility
//! - Define the canonical two-level task → subtask shape shared by the
//!   store, the renderer and the snapshot adapter.
//! - Keep the serialized form identical to the in-memory form so snapshots
//!   round-trip without loss.
//!
//! # Invariants
//! - `id` values are allocated by [`crate::model::list::TaskList`] and never
//!   reused within one store.
//! - `title` is stored trimmed and non-empty; display capitalization never
//!   touches the stored value.
//! - `expanded` is a UI-only flag but is persisted so a restart reproduces
//!   the prior view.

use serde::{Deserialize, Serialize};

/// Stable identifier for a top-level task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = u64;

/// Stable identifier for a subtask within its parent task.
pub type SubtaskId = u64;

/// Child item of a task, independently completable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique within the parent's subtask sequence.
    pub id: SubtaskId,
    /// Trimmed, non-empty display string.
    pub title: String,
    /// Completion flag, toggled directly by the user.
    pub completed: bool,
}

/// Top-level to-do item, optionally decomposed into subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the store.
    pub id: TaskId,
    /// Trimmed, non-empty display string.
    pub title: String,
    /// Completion flag. Derived from subtasks on subtask toggles when the
    /// task has any; set directly by the user when it has none.
    pub completed: bool,
    /// Insertion order is display order.
    pub subtasks: Vec<Subtask>,
    /// Whether subtasks are currently visible.
    pub expanded: bool,
}

impl Subtask {
    /// Creates a subtask with the given id, not yet completed.
    pub fn new(id: SubtaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

impl Task {
    /// Creates a task with the given id: not completed, no subtasks, and
    /// expanded so newly added subtasks are immediately visible.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            subtasks: Vec::new(),
            expanded: true,
        }
    }

    /// Returns whether this task has at least one subtask.
    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// Returns the subtask with the given id, if present.
    pub fn subtask(&self, subtask_id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|st| st.id == subtask_id)
    }

    /// Completed/total subtask counts used by the rollup and progress math.
    pub fn subtask_counts(&self) -> (usize, usize) {
        let completed = self.subtasks.iter().filter(|st| st.completed).count();
        (completed, self.subtasks.len())
    }
}
