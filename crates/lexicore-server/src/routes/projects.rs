//! Project routes — PDF upload and project listing.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::state::AppState;
use lexicore_store::{NewProject, ProjectRecord};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload_project))
}

/// GET /projects.json — the full project record array.
pub async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectRecord>> {
    Json(state.store.load())
}

/// POST /api/upload — multipart submission: `pdfFile` plus `name`, `query`
/// and optional `description` text fields.
async fn upload_project(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut name = None;
    let mut description = String::new();
    let mut query = None;
    let mut file: Option<(String, axum::body::Bytes)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("pdfFile") => {
                let original = field.file_name().unwrap_or("document.pdf").to_string();
                if let Ok(bytes) = field.bytes().await {
                    file = Some((original, bytes));
                }
            }
            Some("name") => {
                name = field.text().await.ok().filter(|s| !s.trim().is_empty());
            }
            Some("description") => {
                description = field.text().await.unwrap_or_default();
            }
            Some("query") => {
                query = field.text().await.ok().filter(|s| !s.trim().is_empty());
            }
            _ => {}
        }
    }

    let (Some(name), Some(query), Some((original, bytes))) = (name, query, file) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing required fields" })),
        );
    };

    let filename = unique_filename(&original);
    let disk_path = state.config.data_paths.uploads.join(&filename);
    if let Err(e) = std::fs::write(&disk_path, &bytes) {
        error!("Failed to store upload {}: {}", disk_path.display(), e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Server error while saving project" })),
        );
    }

    let new = NewProject {
        name,
        description,
        query,
        file_path: format!("/uploads/{}", filename),
    };

    match state.store.append(new) {
        Ok(project) => {
            info!("Created project {} ({})", project.id, project.name);
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "Project saved successfully",
                    "project": project,
                })),
            )
        }
        Err(e) => {
            error!("Failed to save project: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Server error while saving project" })),
            )
        }
    }
}

/// Collision-resistant stored filename: timestamp, random suffix, sanitized
/// original name.
fn unique_filename(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", millis, &suffix[..8], sanitize_filename(original))
}

/// Sanitize a filename: strip path components, replace whitespace runs.
fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "").replace("..", "");
    let name = std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed");
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
