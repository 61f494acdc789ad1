//! HTTP surface over the contact repository
//!
//! This is a thin API layer: it validates input shape, delegates to
//! [`MemoryDirectory`], and maps repository outcomes onto the wire:
//!
//! - `ValidationError` / `ConflictError` → 400 with a structured body
//! - `NotFoundError` → 404 `{"error": "person not found"}`
//! - success → 200 (204 for delete, no body)
//!
//! Repository errors never escape as panics; every failure becomes a
//! structured JSON error response.

use axum::Json;
use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tracing::info;

use phonebook_core::model::{Contact, ContactPayload};
use phonebook_core::store::MemoryDirectory;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    directory: MemoryDirectory,
}

/// Build the application router over `directory`
pub fn app(directory: MemoryDirectory) -> Router {
    let state = AppState { directory };
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route(
            "/api/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/info", get(info_page))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn list_contacts(State(state): State<AppState>) -> Json<Vec<Contact>> {
    Json(state.directory.list().await)
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<Contact>, ApiError> {
    payload.validate()?;
    let contact = state
        .directory
        .create(payload.name.trim(), payload.number.trim())
        .await?;
    Ok(Json(contact))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.directory.get(&id).await?))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<Contact>, ApiError> {
    payload.validate()?;
    // Identity-preserving: only the number is taken from the payload.
    let contact = state
        .directory
        .replace_number(&id, payload.number.trim())
        .await?;
    Ok(Json(contact))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Side-effect-free informational page: collection size and server time
async fn info_page(State(state): State<AppState>) -> Html<String> {
    let count = state.directory.len().await;
    let now = chrono::Local::now();
    Html(format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{now}</p>"
    ))
}

/// Request logging middleware (method, path, status, latency)
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );
    response
}

/// Structured wire error
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<phonebook_core::Error> for ApiError {
    fn from(err: phonebook_core::Error) -> Self {
        use phonebook_core::Error;
        let status = match err {
            Error::Validation(_) | Error::Conflict(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
