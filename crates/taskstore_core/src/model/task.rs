//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its creation/patch inputs.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is assigned by the store, never mutated and never reused.
//! - `is_deleted` is the source of truth for tombstone state.
//! - `title` is never null once set; patches cannot clear it.

use serde::{Deserialize, Serialize};

/// Stable surrogate identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Canonical task record mirroring one row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned primary key, monotonically increasing.
    pub id: TaskId,
    /// Required text. Empty or whitespace-only values are stored as-is.
    pub title: String,
    /// Optional free-form text, nullable.
    pub description: Option<String>,
    /// Completion flag, defaults to `false` at creation.
    pub completed: bool,
    /// Soft delete tombstone. Deleted rows are invisible to all operations.
    pub is_deleted: bool,
}

impl Task {
    /// Returns whether this task should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Creation input. The store assigns the id and the tombstone flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTask {
    /// Creates an input with `completed = false` and no description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }
}

/// Tri-state patch cell for one nullable column.
///
/// Distinguishes "leave the column alone" from "write NULL" from
/// "write this value", which plain `Option` cannot express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Field was absent from the request; column is not touched.
    #[default]
    Keep,
    /// Field was an explicit null; column is set to NULL.
    Clear,
    /// Field carried a value; column is set to it.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Returns whether applying this cell would change the column.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Keep)
    }
}

/// Partial update for one task.
///
/// `title` and `completed` map to non-nullable columns, so their cells
/// are plain options; callers must reject explicit nulls for them
/// before building a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: FieldPatch<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Returns whether the patch carries no writable field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && !self.description.is_write() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldPatch, NewTask, Task, TaskPatch};

    #[test]
    fn new_task_defaults_to_not_completed() {
        let input = NewTask::new("buy milk");
        assert_eq!(input.title, "buy milk");
        assert_eq!(input.description, None);
        assert!(!input.completed);
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn clearing_description_makes_patch_non_empty() {
        let patch = TaskPatch {
            description: FieldPatch::Clear,
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn active_flag_tracks_tombstone() {
        let mut task = Task {
            id: 1,
            title: "t".to_string(),
            description: None,
            completed: false,
            is_deleted: false,
        };
        assert!(task.is_active());
        task.is_deleted = true;
        assert!(!task.is_active());
    }
}
