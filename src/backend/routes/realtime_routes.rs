/**
 * Realtime and Health Routes
 *
 * - `GET /ws?userId=<id>` - WebSocket upgrade; no authentication
 * - `GET /health` - liveness, store backend and connected session count
 */
use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::backend::realtime::socket::handle_socket_upgrade;
use crate::backend::server::state::AppState;

/// `GET /health` response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub sessions: usize,
}

pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: app_state.store.backend_name(),
        sessions: app_state.sessions.len().await,
    })
}

/// Configure the WebSocket and health routes
pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(handle_socket_upgrade))
        .route("/health", get(health))
}
