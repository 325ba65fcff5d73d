//! HTTP error taxonomy and response mapping.
//!
//! # Responsibility
//! - Convert repository errors into HTTP status + JSON error bodies.
//! - Keep the error body shape (`{"error": message}`) uniform.
//!
//! # Invariants
//! - Store-level failures map to 5xx and are logged; they are never
//!   retried or recovered here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use taskstore_core::RepoError;

/// API-facing error with a fixed status taxonomy.
#[derive(Debug)]
pub enum ApiError {
    /// Caller supplied an unusable request body (400).
    Validation(String),
    /// Referenced id is absent or already soft-deleted (404).
    NotFound(String),
    /// Underlying store failure (500).
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Internal(message) => {
                message
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::EmptyPatch => Self::validation(value.to_string()),
            RepoError::NotFound(id) => Self::not_found(format!("task not found: {id}")),
            RepoError::Db(_) | RepoError::InvalidData(_) => Self::internal(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            error!(
                "event=request_failed module=http status=error error={}",
                self.message()
            );
        }
        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}
