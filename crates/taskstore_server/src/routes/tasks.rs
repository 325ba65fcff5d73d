//! Task CRUD route handlers and wire DTOs.
//!
//! # Responsibility
//! - Translate JSON request bodies into core inputs and back.
//! - Resolve the absent / null / value tri-state for PATCH bodies.
//!
//! # Invariants
//! - Handlers never hold the store lock across an await point.
//! - Explicit `null` for a non-nullable field is rejected with 400
//!   before any core call is made.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use log::info;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use taskstore_core::{
    FieldPatch, NewTask, SqliteTaskRepository, Task, TaskId, TaskPatch, TaskService,
};

/// Body of `POST /api/v1/task`.
///
/// `title` must be present and a string; empty or whitespace-only
/// values are accepted as-is.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

/// Body of `PATCH /api/v1/tasks/{id}`.
///
/// The outer option tracks field presence, the inner option tracks an
/// explicit JSON `null`, so "absent" and "null" stay distinguishable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    completed: Option<Option<bool>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTaskBody {
    /// Resolves the wire shape into a core patch.
    ///
    /// # Errors
    /// - 400 when `title` or `completed` is an explicit `null`; those
    ///   columns are non-nullable and cannot be cleared.
    fn into_patch(self) -> Result<TaskPatch, ApiError> {
        let title = match self.title {
            None => None,
            Some(None) => return Err(ApiError::validation("title cannot be null")),
            Some(Some(value)) => Some(value),
        };
        let completed = match self.completed {
            None => None,
            Some(None) => return Err(ApiError::validation("completed cannot be null")),
            Some(Some(value)) => Some(value),
        };
        let description = match self.description {
            None => FieldPatch::Keep,
            Some(None) => FieldPatch::Clear,
            Some(Some(value)) => FieldPatch::Set(value),
        };

        Ok(TaskPatch {
            title,
            description,
            completed,
        })
    }
}

/// `POST /api/v1/task` — create one task, returning `{"id": n}`.
pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<Json<Value>, ApiError> {
    let new = NewTask {
        title: body.title,
        description: body.description,
        completed: body.completed,
    };

    let conn = state.lock_conn()?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let id = service.create_task(&new)?;

    info!("event=task_create module=http status=ok id={id}");
    Ok(Json(json!({ "id": id })))
}

/// `GET /api/v1/tasks` — all active tasks in insertion order.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let conn = state.lock_conn()?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let tasks = service.list_active()?;
    Ok(Json(tasks))
}

/// `GET /api/v1/task/{id}` — one active task, 404 when missing or
/// soft-deleted.
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<Task>, ApiError> {
    let conn = state.lock_conn()?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    match service.get_task(id)? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::not_found(format!("task not found: {id}"))),
    }
}

/// `PATCH /api/v1/tasks/{id}` — partial update, returning the full
/// updated row.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let patch = body.into_patch()?;

    let conn = state.lock_conn()?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let task = service.patch_task(id, &patch)?;

    info!("event=task_update module=http status=ok id={id}");
    Ok(Json(task))
}

/// `DELETE /api/v1/tasks/{id}` — soft delete, returning `{"id": n}`.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.lock_conn()?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let id = service.soft_delete_task(id)?;

    info!("event=task_delete module=http status=ok id={id}");
    Ok(Json(json!({ "id": id })))
}
