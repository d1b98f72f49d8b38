//! Local stand-in for the Forecast and GitHub REST APIs.
//!
//! Both APIs are served from one axum router on an ephemeral port, running on
//! its own tokio runtime in a background thread so the blocking clients under
//! test can talk to it from ordinary `#[test]` functions.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "secret-key";
pub const PREVIEW: &str = "application/vnd.github.inertia-preview+json";

/// Project id whose cards include one that GitHub rejects.
pub const FAILING_PROJECT: i64 = 9;
/// Project id whose only card has an author missing from the persons list.
pub const ORPHAN_PROJECT: i64 = 11;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    requests: Vec<Recorded>,
    next_issue: u64,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApis {
    pub url: String,
    state: Shared,
}

impl MockApis {
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = router(state.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn posts_to(&self, suffix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.path.ends_with(suffix))
            .collect()
    }

    /// Write a config file pointing both API hosts at this server.
    pub fn write_config(&self, dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[forecast]\nhost = \"{url}\"\n\n[github]\nhost = \"{url}\"\nthrottle_ms = 0\n",
                url = self.url
            ),
        )
        .unwrap();
        path
    }
}

fn record(state: &Shared, method: &'static str, path: String, body: Value) {
    state
        .lock()
        .unwrap()
        .requests
        .push(Recorded { method, path, body });
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/v1/cards", get(all_cards))
        .route("/api/v1/projects/{id}/cards", get(project_cards))
        .route("/api/v1/cards/{id}/comments", get(card_comments))
        .route("/api/v1/persons", get(persons))
        .route("/repos/{owner}/{repo}/projects", get(projects))
        .route("/projects/{id}/columns", get(columns))
        .route("/repos/{owner}/{repo}/issues", post(create_issue))
        .route(
            "/repos/{owner}/{repo}/issues/{number}/comments",
            post(create_comment),
        )
        .route("/projects/columns/{id}/cards", post(create_project_card))
        .with_state(state)
}

// =============================================================================
// Forecast
// =============================================================================

fn forecast_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-forecast-api-key")
        .and_then(|v| v.to_str().ok())
        == Some(API_KEY)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"}))).into_response()
}

fn card(id: i64, title: &str, description: Value, sprint: i64, column: i64, by: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": description,
        "sprint": sprint,
        "workflow_column": column,
        "created_by": by,
        "estimate": 120,
    })
}

fn fixture_cards() -> Vec<Value> {
    vec![
        card(1, "Fix bug", json!("desc"), 10, 100, 1),
        card(2, "Add feature", json!("<p>more</p>"), 10, 200, 2),
        card(3, "Other sprint", Value::Null, 20, 100, 1),
    ]
}

async fn all_cards(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET", "/api/v1/cards".to_string(), Value::Null);
    if !forecast_authorized(&headers) {
        return unauthorized();
    }
    Json(fixture_cards()).into_response()
}

async fn project_cards(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET", format!("/api/v1/projects/{}/cards", id), Value::Null);
    if !forecast_authorized(&headers) {
        return unauthorized();
    }
    let cards = match id {
        7 => vec![fixture_cards().remove(0)],
        FAILING_PROJECT => vec![
            card(1, "Fix bug", json!("desc"), 10, 100, 1),
            card(4, "Explode", json!("github rejects this"), 10, 100, 1),
            card(2, "Add feature", json!("<p>more</p>"), 10, 200, 2),
        ],
        ORPHAN_PROJECT => vec![card(5, "Orphan", json!("who?"), 10, 100, 99)],
        _ => return (StatusCode::NOT_FOUND, Json(json!({"message": "no project"}))).into_response(),
    };
    Json(cards).into_response()
}

async fn card_comments(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET", format!("/api/v1/cards/{}/comments", id), Value::Null);
    if !forecast_authorized(&headers) {
        return unauthorized();
    }
    let comments = match id {
        1 => json!([{"id": 1, "person_id": 2, "comment": "Looks good"}]),
        3 => json!([
            {"id": 2, "person_id": 1, "comment": "first"},
            {"id": 3, "person_id": 2, "comment": "second"}
        ]),
        _ => json!([]),
    };
    Json(comments).into_response()
}

async fn persons(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET", "/api/v1/persons".to_string(), Value::Null);
    if !forecast_authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": 1, "first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"},
        {"id": 2, "first_name": "John", "last_name": "Smith", "email": "john@example.com"}
    ]))
    .into_response()
}

// =============================================================================
// GitHub
// =============================================================================

fn github_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "))
}

fn has_preview(headers: &HeaderMap) -> bool {
    headers.get("accept").and_then(|v| v.to_str().ok()) == Some(PREVIEW)
}

fn unsupported_media() -> Response {
    (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({"message": "projects need the preview media type"})),
    )
        .into_response()
}

async fn projects(
    State(state): State<Shared>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET", format!("/repos/{}/{}/projects", owner, repo), Value::Null);
    if !github_authorized(&headers) {
        return unauthorized();
    }
    if !has_preview(&headers) {
        return unsupported_media();
    }
    Json(json!([
        {"id": 77, "number": 3, "name": "Roadmap"},
        {"id": 78, "number": 4, "name": "Empty board"}
    ]))
    .into_response()
}

async fn columns(State(state): State<Shared>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    record(&state, "GET", format!("/projects/{}/columns", id), Value::Null);
    if !has_preview(&headers) {
        return unsupported_media();
    }
    let columns = match id {
        77 => json!([{"id": 501, "name": "To do"}, {"id": 502, "name": "Done"}]),
        _ => json!([]),
    };
    Json(columns).into_response()
}

async fn create_issue(
    State(state): State<Shared>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/repos/{}/{}/issues", owner, repo);
    record(&state, "POST", path, body.clone());
    if !github_authorized(&headers) {
        return unauthorized();
    }
    if body["title"] == "Explode" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Validation Failed"})),
        )
            .into_response();
    }

    let number = {
        let mut guard = state.lock().unwrap();
        guard.next_issue += 1;
        guard.next_issue
    };
    (
        StatusCode::CREATED,
        Json(json!({"id": 1000 + number, "number": number, "title": body["title"]})),
    )
        .into_response()
}

async fn create_comment(
    State(state): State<Shared>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/repos/{}/{}/issues/{}/comments", owner, repo, number);
    record(&state, "POST", path, body);
    if !github_authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::CREATED, Json(json!({"id": 9000 + number}))).into_response()
}

async fn create_project_card(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "POST", format!("/projects/columns/{}/cards", id), body);
    if !has_preview(&headers) {
        return unsupported_media();
    }
    (StatusCode::CREATED, Json(json!({"id": 1}))).into_response()
}
