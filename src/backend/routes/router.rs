/**
 * Router Configuration
 *
 * Combines all route groups into one axum router and applies the
 * cross-cutting layers:
 *
 * 1. Realtime routes (`/ws`, `/health`)
 * 2. API routes (`/users`, `/boards`)
 * 3. Fallback: 404 `{"message": "API route not found"}`
 * 4. `CorsLayer` for `CLIENT_URL` and `TraceLayer` for request logging
 */
use axum::{http::HeaderValue, http::StatusCode, response::Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_realtime_routes(Router::new());
    let router = configure_api_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(cors_layer(&app_state.config.client_url))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "API route not found" })))
}

fn cors_layer(client_url: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match client_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("[Server] CLIENT_URL '{}' is not a valid origin ({}); allowing any origin", client_url, e);
            layer.allow_origin(Any)
        }
    }
}
