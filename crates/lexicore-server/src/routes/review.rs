//! Review routes — AI answers about a project's stored PDF.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;
use lexicore_review::greeting_reply;

/// Prompt used on the fetch path when a record's stored query is empty.
const DEFAULT_PROMPT: &str = "No query provided";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/review/{project_id}", get(fetch_review).post(chat_review))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    prompt: String,
}

/// GET /api/review/:projectId — answer the project's own stored query.
async fn fetch_review(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> impl IntoResponse {
    let Some(project) = state.store.find_by_id(project_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Project not found" })),
        );
    };

    let prompt = if project.query.trim().is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        project.query.clone()
    };

    let reply = state.reviewer.review(&prompt, &project.file_path).await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": reply.message })),
    )
}

/// POST /api/review/:projectId — chat about the project.
/// Body: `{ "prompt": "user message" }`.
async fn chat_review(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    if req.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": "Please provide a message to send to the AI."
            })),
        );
    }

    let Some(project) = state.store.find_by_id(project_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Project not found" })),
        );
    };

    // Bare greetings skip extraction and the completion call entirely.
    if let Some(canned) = greeting_reply(&req.prompt) {
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "message": canned })),
        );
    }

    let reply = state.reviewer.review(&req.prompt, &project.file_path).await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": reply.message })),
    )
}
