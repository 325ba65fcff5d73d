//! Shared request-handler state.
//!
//! # Responsibility
//! - Own the single long-lived SQLite connection for the process.
//! - Serialize store access across concurrent requests.
//!
//! # Invariants
//! - The connection is only reachable through the mutex; handlers never
//!   hold the guard across an await point.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Application state injected into every handler.
///
/// A mutex-serialized single connection is intentional: the store sees
/// one statement at a time, regardless of how the host runtime
/// schedules requests.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an already-bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Acquires the store handle for the duration of one operation.
    pub fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.conn
            .lock()
            .map_err(|_| ApiError::internal("task store handle poisoned"))
    }
}
