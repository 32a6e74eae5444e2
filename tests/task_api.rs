//! HTTP contract of the `/tasks` resource, driven through the router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use kanban_server::{
    app_state::AppState,
    map_routes,
    persist::{MemoryStore, Store, StoreError},
    repository::TaskRepository,
    seed::seed_tasks,
    task::Task,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

fn app_with(store: Box<dyn Store>) -> Router {
    map_routes(Arc::new(AppState::new(Arc::new(TaskRepository::new(store)))))
}

fn empty_app() -> Router {
    app_with(Box::new(MemoryStore::with_tasks(Vec::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Task {
    let (status, value) = send(app, "POST", "/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(value).unwrap()
}

struct BrokenStore;

impl Store for BrokenStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        Err(StoreError::Redb("database is locked".to_string()))
    }

    fn save(&self, _tasks: &[Task]) -> Result<(), StoreError> {
        Err(StoreError::Redb("database is locked".to_string()))
    }
}

#[tokio::test]
async fn list_seeds_fresh_store() {
    let app = app_with(Box::new(MemoryStore::new()));

    let (status, first) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<Task> = serde_json::from_value(first.clone()).unwrap();
    assert_eq!(tasks, seed_tasks());

    let (_, second) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_applies_defaults() {
    let app = empty_app();
    let before = chrono::Utc::now();

    let (status, value) = send(&app, "POST", "/tasks", Some(json!({ "title": "Write spec" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["title"], "Write spec");
    assert_eq!(value["status"], "backlog");
    assert_eq!(value["priority"], "medium");
    assert_eq!(value["description"], "");
    assert!(value["dueDate"].is_null());
    assert!(value["id"].as_str().is_some_and(|id| !id.is_empty()));

    let task: Task = serde_json::from_value(value).unwrap();
    assert!(task.created_at >= before && task.created_at <= chrono::Utc::now());

    // Blank form fields fall back to the defaults.
    let (status, value) = send(
        &app,
        "POST",
        "/tasks",
        Some(json!({ "title": "x", "description": "", "status": "", "priority": "", "dueDate": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["status"], "backlog");
    assert_eq!(value["priority"], "medium");
    assert_eq!(value["description"], "");
    assert!(value["dueDate"].is_null());

    let (status, value) = send(
        &app,
        "POST",
        "/tasks",
        Some(json!({ "title": "y", "status": null, "priority": null, "dueDate": null })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["status"], "backlog");
    assert_eq!(value["priority"], "medium");
    assert!(value["dueDate"].is_null());
}

#[tokio::test]
async fn blank_due_date_clears_on_update() {
    let app = empty_app();
    let task = create(&app, json!({ "title": "Dated", "dueDate": "2026-03-01" })).await;
    assert!(task.due_date.is_some());

    let (status, value) = send(&app, "PUT", "/tasks", Some(json!({ "id": task.id, "dueDate": "" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(value["dueDate"].is_null());
    assert_eq!(value["title"], "Dated");
}

#[tokio::test]
async fn create_without_title_is_bad_request() {
    let app = empty_app();

    let (status, value) = send(&app, "POST", "/tasks", Some(json!({ "description": "no title" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());

    let (status, _) = send(&app, "POST", "/tasks", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = empty_app();

    let (status, _) = send(&app, "POST", "/tasks", Some(json!({ "title": "x", "status": "archived" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/tasks", Some(json!({ "id": "x", "priority": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_partial_fields() {
    let app = empty_app();
    let task = create(&app, json!({ "title": "Write spec", "description": "draft" })).await;

    let (status, value) = send(
        &app,
        "PUT",
        "/tasks",
        Some(json!({
            "id": task.id,
            "status": "in-progress",
            "dueDate": "2026-03-01",
            "createdAt": "1999-01-01T00:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: Task = serde_json::from_value(value).unwrap();
    assert_eq!(updated.status.as_str(), "in-progress");
    assert_eq!(updated.due_date.map(|d| d.to_string()).as_deref(), Some("2026-03-01"));
    assert_eq!(updated.id, task.id);
    assert_eq!(updated.created_at, task.created_at);
    assert_eq!(updated.title, task.title);
    assert_eq!(updated.description, task.description);

    let (_, list) = send(&app, "GET", "/tasks", None).await;
    let tasks: Vec<Task> = serde_json::from_value(list).unwrap();
    assert_eq!(tasks.iter().filter(|t| t.id == task.id).count(), 1);
    assert!(tasks.iter().all(|t| t.status.as_str() != "backlog"));
}

#[tokio::test]
async fn update_requires_known_id() {
    let app = empty_app();

    let (status, value) = send(&app, "PUT", "/tasks", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Task ID required");

    let (status, value) = send(&app, "PUT", "/tasks", Some(json!({ "id": "missing", "status": "done" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "Task not found");
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let app = empty_app();
    let task = create(&app, json!({ "title": "Doomed" })).await;
    let uri = format!("/tasks?id={}", task.id);

    let (status, value) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "success": true }));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn delete_requires_id() {
    let app = empty_app();

    let (status, _) = send(&app, "DELETE", "/tasks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/tasks?id=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let app = app_with(Box::new(BrokenStore));

    let (status, value) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Store details stay out of the response.
    assert_eq!(value["error"], "Task storage unavailable");

    let (status, _) = send(&app, "POST", "/tasks", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "DELETE", "/tasks?id=task-001", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, value) = send(&empty_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "status": "ok" }));
}
