// HTTP + WebSocket routes over the rendered board

mod http;
mod page;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tower_http::cors::{Any, CorsLayer};

use crate::board::Board;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) board: Arc<Board>,
    pub(crate) ws_board_connections: Arc<AtomicUsize>,
}

pub fn app(board: Arc<Board>, ws_board_connections: Arc<AtomicUsize>) -> Router {
    let state = AppState {
        board,
        ws_board_connections,
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/board", get(http::board_handler)) // GET /api/board
        .route("/ws/board", get(ws::ws_board)) // WS /ws/board
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
