// GET handlers: page, version, health, board

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::AppState;
use super::page::render_page;
use crate::version::{NAME, VERSION};

/// GET / — dashboard page with the current board rendered in place.
pub(super) async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let targets = state.board.snapshot().await;
    Html(render_page(&targets))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn health_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": NAME,
    }))
}

/// GET /api/board — every target's latest content.
pub(super) async fn board_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.board.snapshot().await)
}
