/**
 * Server Initialization
 *
 * 1. Pick the store: Postgres when `DATABASE_URL` connects, memory otherwise
 * 2. Create the fan-out channel
 * 3. Assemble `AppState`
 * 4. Run the consistency sweep once, then periodically if configured
 * 5. Build the router
 */
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::consistency::{reconcile, spawn_reconcile_loop};
use crate::backend::realtime::broadcast::channel;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::{EntityStore, MemoryStore, PgStore};
use crate::shared::AppConfig;

/// Create and configure the axum application
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("[Server] Initializing taskboard backend");

    let store = match load_database(&config).await {
        Some(pool) => EntityStore::new(Arc::new(PgStore::new(pool))),
        None => EntityStore::new(Arc::new(MemoryStore::new())),
    };
    tracing::info!("[Server] Using {} store", store.backend_name());

    let app_state = build_state(config, store);

    match reconcile(&app_state.store).await {
        Ok(report) if !report.is_clean() => {
            tracing::warn!("[Server] Startup sweep repaired drift: {:?}", report)
        }
        Ok(_) => tracing::info!("[Server] Startup sweep found no drift"),
        Err(e) => tracing::error!("[Server] Startup sweep failed: {}", e),
    }

    let interval = app_state.config.reconcile_interval_secs;
    if interval > 0 {
        spawn_reconcile_loop(app_state.store.clone(), Duration::from_secs(interval));
        tracing::info!("[Server] Periodic sweep every {}s", interval);
    }

    create_router(app_state)
}

/// Application state over the given store, with a fresh fan-out channel
pub fn build_state(config: AppConfig, store: EntityStore) -> AppState {
    let realtime_broadcast = channel(config.broadcast_capacity);
    tracing::info!(
        "[Server] Broadcast channel initialized (capacity {})",
        config.broadcast_capacity
    );
    AppState::new(config, store, realtime_broadcast)
}
