//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for surface crates.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoResult, TaskRepository};

/// Use-case service wrapper for task CRUD operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new task and returns its store-assigned id.
    pub fn create_task(&self, new: &NewTask) -> RepoResult<TaskId> {
        self.repo.create_task(new)
    }

    /// Lists all active tasks in insertion order.
    pub fn list_active(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_active()
    }

    /// Gets one active task by id.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Applies a partial update and returns the full updated row.
    ///
    /// Returns repository-level empty-patch or not-found errors unchanged.
    pub fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        self.repo.patch_task(id, patch)
    }

    /// Soft-deletes a task by id, returning the id on success.
    pub fn soft_delete_task(&self, id: TaskId) -> RepoResult<TaskId> {
        self.repo.soft_delete_task(id)
    }
}
