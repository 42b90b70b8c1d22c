//! Dashboard runtime config, health probe and the embedded frontend.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;

// ─── Router ──────────────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/config", get(get_dashboard_config))
        .route("/healthz", get(healthz))
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct DashboardInfo {
    api_root: String,
    version: &'static str,
}

/// Where the browser should send experiment API calls.
async fn get_dashboard_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(DashboardInfo {
        api_root: state.dashboard.api_root.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

// ─── Frontend (embedded) ─────────────────────────────────────────────────────

/// Serve the embedded frontend HTML/JS/CSS. Unknown paths get `index.html`.
pub async fn serve_frontend(uri: axum::http::Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    let (actual_path, content) = match Assets::get(path) {
        Some(content) => (path, content),
        None => match Assets::get("index.html") {
            Some(content) => ("index.html", content),
            None => return StatusCode::NOT_FOUND.into_response(),
        },
    };

    let mime = mime_guess::from_path(actual_path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(content.data.into_owned()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[derive(rust_embed::Embed)]
#[folder = "../../frontend/dist"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.wasm"]
struct Assets;
