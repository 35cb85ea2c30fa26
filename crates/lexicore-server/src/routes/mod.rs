//! HTTP route handlers — matches the frontend API surface.

pub mod projects;
pub mod review;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
///
/// Uploaded PDFs are served read-only under `/uploads`; everything that is
/// not an API route falls back to the static frontend (SPA-style).
pub fn build_router(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(&state.config.data_paths.uploads);
    let index = state.config.public_dir.join("index.html");
    let frontend = ServeDir::new(&state.config.public_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest("/api", api_routes())
        .route("/projects.json", get(projects::list_projects))
        .nest_service("/uploads", uploads)
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(projects::routes())
        .merge(review::routes())
}
