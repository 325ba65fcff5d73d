//! HTTP surface for the task store.
//!
//! # Responsibility
//! - Build the axum router for the versioned REST API.
//! - Keep HTTP concerns (status codes, JSON shapes) out of core.
//!
//! # Endpoints
//! - `POST   /api/v1/task`        create one task
//! - `GET    /api/v1/tasks`       list active tasks
//! - `GET    /api/v1/task/{id}`   fetch one active task
//! - `PATCH  /api/v1/tasks/{id}`  partial update
//! - `DELETE /api/v1/tasks/{id}`  soft delete
//! - `GET    /`                   service banner

pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, patch, post};
use axum::Router;
use log::info;
use state::AppState;
use std::net::SocketAddr;

/// Builds the full application router over the shared store handle.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root::banner))
        .route("/api/v1/task", post(routes::tasks::create_task))
        .route("/api/v1/tasks", get(routes::tasks::list_tasks))
        .route("/api/v1/task/{id}", get(routes::tasks::get_task))
        .route(
            "/api/v1/tasks/{id}",
            patch(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .with_state(state)
}

/// Binds the listener and serves requests until the process exits.
pub async fn start_server(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=http_listen module=http status=ok addr={addr}");
    axum::serve(listener, router).await
}
