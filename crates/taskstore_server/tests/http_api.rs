use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use taskstore_core::db::open_db_in_memory;
use taskstore_server::{build_router, state::AppState};
use tower::ServiceExt;

fn test_router() -> Router {
    let conn = open_db_in_memory().expect("in-memory store should open");
    build_router(AppState::new(conn))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request should build"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

#[tokio::test]
async fn root_banner_names_the_service() {
    let router = test_router();
    let (status, body) = send(&router, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "taskstore API");
    assert!(body["docs"].is_string());
}

#[tokio::test]
async fn full_task_lifecycle_scenario() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "Buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().expect("id should be an integer");
    assert_eq!(id, 1);

    let (status, body) = send(&router, Method::GET, "/api/v1/task/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "title": "Buy milk",
            "description": null,
            "completed": false,
            "is_deleted": false,
        })
    );

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/v1/tasks/1",
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);
    assert_eq!(body["title"], "Buy milk");

    let (status, body) = send(&router, Method::DELETE, "/api/v1/tasks/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1}));

    let (status, _) = send(&router, Method::GET, "/api/v1/task/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&router, Method::GET, "/api/v1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_assigns_increasing_ids() {
    let router = test_router();

    let (_, first) = send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "a"})),
    )
    .await;
    let (_, second) = send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "b", "description": "with text", "completed": true})),
    )
    .await;

    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();
    assert!(second_id > first_id);
}

#[tokio::test]
async fn create_without_title_is_rejected() {
    let router = test_router();

    let (status, _) = send(&router, Method::POST, "/api/v1/task", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_returns_only_active_tasks_in_insertion_order() {
    let router = test_router();

    for title in ["one", "two", "three"] {
        send(
            &router,
            Method::POST,
            "/api/v1/task",
            Some(json!({"title": title})),
        )
        .await;
    }
    send(&router, Method::DELETE, "/api/v1/tasks/2", None).await;

    let (status, body) = send(&router, Method::GET, "/api/v1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "three"]);
}

#[tokio::test]
async fn get_missing_task_returns_404() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/api/v1/task/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn patch_with_empty_body_returns_400_and_leaves_row_unchanged() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "stable"})),
    )
    .await;

    let (status, body) = send(&router, Method::PATCH, "/api/v1/tasks/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, task) = send(&router, Method::GET, "/api/v1/task/1", None).await;
    assert_eq!(task["title"], "stable");
    assert_eq!(task["completed"], false);
}

#[tokio::test]
async fn patch_missing_task_returns_404() {
    let router = test_router();

    let (status, _) = send(
        &router,
        Method::PATCH,
        "/api/v1/tasks/5",
        Some(json!({"title": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_with_null_description_clears_it() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "note", "description": "stale"})),
    )
    .await;

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/v1/tasks/1",
        Some(json!({"description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["title"], "note");
}

#[tokio::test]
async fn patch_with_null_title_returns_400() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "kept"})),
    )
    .await;

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/v1/tasks/1",
        Some(json!({"title": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));

    let (_, task) = send(&router, Method::GET, "/api/v1/task/1", None).await;
    assert_eq!(task["title"], "kept");
}

#[tokio::test]
async fn delete_twice_returns_404_on_second_call() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "once"})),
    )
    .await;

    let (status, body) = send(&router, Method::DELETE, "/api/v1/tasks/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1}));

    let (status, _) = send(&router, Method::DELETE, "/api/v1/tasks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let router = test_router();

    send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "first"})),
    )
    .await;
    send(&router, Method::DELETE, "/api/v1/tasks/1", None).await;

    let (_, body) = send(
        &router,
        Method::POST,
        "/api/v1/task",
        Some(json!({"title": "second"})),
    )
    .await;
    assert_eq!(body["id"], 2);
}
