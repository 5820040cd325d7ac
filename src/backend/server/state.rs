/**
 * Application State Management
 *
 * `AppState` is the central state container handed to the router. The
 * `FromRef` implementations let handlers extract only the part they need,
 * e.g. `State<BoardService>` or `State<SessionRegistry>`.
 *
 * Everything inside is cheap to clone: stores and registries share their
 * data behind `Arc`, and `broadcast::Sender` clones share one channel.
 */
use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::IdentityProvider;
use crate::backend::board::service::BoardService;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::realtime::sessions::SessionRegistry;
use crate::backend::store::EntityStore;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<AppConfig>,

    /// Typed document store (Postgres or in-memory)
    pub store: EntityStore,

    /// bcrypt hashing and JWT issue/verify
    pub identity: IdentityProvider,

    /// Fan-out channel; every WebSocket session subscribes to it
    pub realtime_broadcast: RealtimeEventBroadcast,

    /// Connected WebSocket sessions
    pub sessions: SessionRegistry,

    /// Board/column/task mutations
    pub boards: BoardService,
}

impl AppState {
    /// Assemble state around an existing store
    pub fn new(config: AppConfig, store: EntityStore, realtime_broadcast: RealtimeEventBroadcast) -> Self {
        let identity = IdentityProvider::from_config(&config);
        let boards = BoardService::new(store.clone(), realtime_broadcast.clone());
        Self {
            config: Arc::new(config),
            store,
            identity,
            realtime_broadcast,
            sessions: SessionRegistry::new(),
            boards,
        }
    }
}

impl FromRef<AppState> for EntityStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for IdentityProvider {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime_broadcast.clone()
    }
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for BoardService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.boards.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
