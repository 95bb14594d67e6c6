//! In-memory backend serving the notes API over HTTP
//!
//! Will be destroyed when the test ends

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::IF_MATCH;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::put;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use chrono::DateTime;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;
use tower_http::trace::TraceLayer;
use url::Url;
use uuid::Uuid;

use crate::config::parse_api_url;

pub const TOKEN: &str = "verysecret";

/// Creation date of the first note, later notes are a minute apart
const EPOCH: i64 = 1_711_958_400;

type Note = Map<String, Value>;

#[derive(Debug, Default)]
struct Inner {
    notes: Vec<Note>,
    sequence: i64,
    requests: usize,
    failing: bool,
    numeric_ids: bool,
    versioned: bool,
    last_body: Option<Value>,
}

/// Fake backend, cloned into every handler
#[derive(Clone, Debug, Default)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
}

/// Error response like the real backend sends
fn error(status: StatusCode, error: &str, description: Option<&str>) -> Response {
    let mut body = json!({ "error": error });
    if let Some(description) = description {
        body["description"] = Value::String(description.to_string());
    }

    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Note not found", None)
}

fn matches_id(note: &Note, id: &str) -> bool {
    match note.get("id") {
        Some(Value::String(value)) => value == id,
        Some(Value::Number(value)) => value.to_string() == id,
        _ => false,
    }
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out numbers as IDs instead of strings
    pub async fn with_numeric_ids(self) -> Self {
        self.inner.lock().await.numeric_ids = true;
        self
    }

    /// Keep a version per note and check `If-Match` against it
    pub async fn with_versions(self) -> Self {
        self.inner.lock().await.versioned = true;
        self
    }

    /// Store a note as-is, it is listed first
    pub async fn seed(&self, note: Value) {
        let Value::Object(note) = note else {
            panic!("Seeded note must be an object");
        };

        self.inner.lock().await.notes.insert(0, note);
    }

    /// Answer every request with a server error from now on
    pub async fn fail(&self, failing: bool) {
        self.inner.lock().await.failing = failing;
    }

    /// Number of requests that reached the backend
    pub async fn requests(&self) -> usize {
        self.inner.lock().await.requests
    }

    /// Body of the last create, update or reminder request
    pub async fn last_body(&self) -> Option<Value> {
        self.inner.lock().await.last_body.clone()
    }

    /// Change a note behind the back of the client
    pub async fn touch(&self, id: &str) {
        let mut inner = self.inner.lock().await;

        if let Some(note) = inner.find_mut(id) {
            let version = note.get("version").and_then(Value::as_i64).unwrap_or(0);
            note.insert("version".to_string(), json!(version + 1));
        }
    }

    pub async fn notes(&self) -> Vec<Value> {
        self.inner
            .lock()
            .await
            .notes
            .iter()
            .cloned()
            .map(Value::Object)
            .collect()
    }

    /// Serve on a random local port, giving back the base URL of the API
    pub async fn spawn(&self) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        parse_api_url(&format!("http://{address}/api")).unwrap()
    }

    fn router(&self) -> Router {
        let notes = Router::new()
            .route("/notes", get(list).post(create))
            .route("/notes/{id}", put(update).delete(delete))
            .route("/notes/{id}/reminder", put(reminder));

        Router::new()
            .nest("/api", notes)
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Count the request and check it may go through
    async fn enter(
        &self,
        authorization: Option<TypedHeader<Authorization<Bearer>>>,
    ) -> Result<MutexGuard<'_, Inner>, Response> {
        let mut inner = self.inner.lock().await;
        inner.requests += 1;

        match authorization {
            Some(TypedHeader(Authorization(bearer))) if bearer.token() == TOKEN => {}
            _ => return Err(error(StatusCode::UNAUTHORIZED, "Unauthorized", None)),
        }

        if inner.failing {
            return Err(error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                Some("Database down"),
            ));
        }

        Ok(inner)
    }
}

impl Inner {
    fn next_id(&mut self) -> Value {
        self.sequence += 1;

        if self.numeric_ids {
            json!(self.sequence)
        } else {
            json!(Uuid::new_v4().to_string())
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(EPOCH + self.sequence * 60, 0).unwrap()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| matches_id(note, id))
    }
}

async fn list(
    State(backend): State<Backend>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
) -> Response {
    let inner = match backend.enter(authorization).await {
        Ok(inner) => inner,
        Err(response) => return response,
    };

    Json(inner.notes.clone()).into_response()
}

async fn create(
    State(backend): State<Backend>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = match backend.enter(authorization).await {
        Ok(inner) => inner,
        Err(response) => return response,
    };

    inner.last_body = Some(body.clone());

    let Value::Object(mut note) = body else {
        return error(StatusCode::BAD_REQUEST, "Invalid JSON", None);
    };

    if note
        .get("title")
        .and_then(Value::as_str)
        .is_none_or(|title| title.trim().is_empty())
    {
        return error(
            StatusCode::BAD_REQUEST,
            "Data error",
            Some("title is required"),
        );
    }

    let id = inner.next_id();
    note.insert("id".to_string(), id);
    note.insert("createdAt".to_string(), json!(inner.created_at()));
    if inner.versioned {
        note.insert("version".to_string(), json!(1));
    }

    inner.notes.insert(0, note.clone());

    (StatusCode::CREATED, Json(note)).into_response()
}

async fn update(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = match backend.enter(authorization).await {
        Ok(inner) => inner,
        Err(response) => return response,
    };

    inner.last_body = Some(body.clone());

    let versioned = inner.versioned;
    let Some(note) = inner.find_mut(&id) else {
        return not_found();
    };

    let Value::Object(changes) = body else {
        return error(StatusCode::BAD_REQUEST, "Invalid JSON", None);
    };

    if versioned {
        let version = note.get("version").and_then(Value::as_i64).unwrap_or(0);
        let expected = headers.get(IF_MATCH).and_then(|value| value.to_str().ok());

        if let Some(expected) = expected
            && expected != format!("\"{version}\"")
        {
            return error(StatusCode::CONFLICT, "Note was changed", None);
        }

        note.insert("version".to_string(), json!(version + 1));
    }

    for (key, value) in changes {
        if key != "id" && key != "createdAt" && key != "version" {
            note.insert(key, value);
        }
    }

    Json(note.clone()).into_response()
}

async fn delete(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
) -> Response {
    let mut inner = match backend.enter(authorization).await {
        Ok(inner) => inner,
        Err(response) => return response,
    };

    let before = inner.notes.len();
    inner.notes.retain(|note| !matches_id(note, &id));

    if inner.notes.len() == before {
        return not_found();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn reminder(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = match backend.enter(authorization).await {
        Ok(inner) => inner,
        Err(response) => return response,
    };

    inner.last_body = Some(body.clone());

    let Some(note) = inner.find_mut(&id) else {
        return not_found();
    };

    match (body["action"].as_str(), &body["newDate"]) {
        (Some("complete"), _) => {
            note.insert("isReminder".to_string(), json!(false));
            note.insert("reminderDate".to_string(), Value::Null);
        }
        (Some("reschedule"), Value::String(new_date)) => {
            note.insert("isReminder".to_string(), json!(true));
            note.insert("reminderDate".to_string(), json!(new_date));
        }
        _ => {
            return error(
                StatusCode::BAD_REQUEST,
                "Data error",
                Some("unknown reminder action"),
            );
        }
    }

    Json(note.clone()).into_response()
}
