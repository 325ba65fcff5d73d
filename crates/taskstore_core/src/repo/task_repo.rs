//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every operation is constrained to `is_deleted = 0` rows; tombstoned
//!   tasks behave as if absent.
//! - Patch writes touch only the columns the patch resolves; one empty
//!   patch never reaches SQL.

use crate::db::DbError;
use crate::model::task::{FieldPatch, NewTask, Task, TaskId, TaskPatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    is_deleted
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    EmptyPatch,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::EmptyPatch => write!(f, "patch contains no fields to update"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::EmptyPatch | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Inserts one task and returns its store-assigned id.
    fn create_task(&self, new: &NewTask) -> RepoResult<TaskId>;
    /// Returns all active tasks in insertion order.
    fn list_active(&self) -> RepoResult<Vec<Task>>;
    /// Returns one active task, or `None` when missing or tombstoned.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Applies a partial update and returns the full updated row.
    fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    /// Tombstones one active task and returns its id.
    fn soft_delete_task(&self, id: TaskId) -> RepoResult<TaskId>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn active_task_exists(&self, id: TaskId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM tasks WHERE id = ?1 AND is_deleted = 0
            );",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, new: &NewTask) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (title, description, completed, is_deleted)
             VALUES (?1, ?2, ?3, 0);",
            params![
                new.title.as_str(),
                new.description.as_deref(),
                bool_to_int(new.completed),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_active(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE is_deleted = 0;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE id = ?1 AND is_deleted = 0;"
        ))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        if patch.is_empty() {
            return Err(RepoError::EmptyPatch);
        }

        if !self.active_task_exists(id)? {
            return Err(RepoError::NotFound(id));
        }

        let mut set_clauses: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            set_clauses.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        match &patch.description {
            FieldPatch::Keep => {}
            FieldPatch::Clear => {
                set_clauses.push("description = ?");
                bind_values.push(Value::Null);
            }
            FieldPatch::Set(description) => {
                set_clauses.push("description = ?");
                bind_values.push(Value::Text(description.clone()));
            }
        }
        if let Some(completed) = patch.completed {
            set_clauses.push("completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        let sql = format!("UPDATE tasks SET {} WHERE id = ?;", set_clauses.join(", "));
        bind_values.push(Value::Integer(id));
        self.conn.execute(&sql, params_from_iter(bind_values))?;

        let mut stmt = self.conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_task_row(row),
            // Existence was checked above; a vanished row means the store
            // itself is inconsistent.
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn soft_delete_task(&self, id: TaskId) -> RepoResult<TaskId> {
        let changed = self.conn.execute(
            "UPDATE tasks SET is_deleted = 1 WHERE id = ?1 AND is_deleted = 0;",
            params![id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(id)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = int_to_bool(row.get::<_, i64>("completed")?, "tasks.completed")?;
    let is_deleted = int_to_bool(row.get::<_, i64>("is_deleted")?, "tasks.is_deleted")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        is_deleted,
    })
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
