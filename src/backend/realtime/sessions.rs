/**
 * Session Registry
 *
 * Tracks connected WebSocket sessions. A session's identity is the `userId`
 * query parameter when the client supplied one, or a generated anonymous id.
 * Identities are not authenticated; the registry is for bookkeeping and logs.
 */
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One connected session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Connection id, unique per socket
    pub id: Uuid,
    /// `userId` from the handshake, or `anon-<id>`
    pub identity: String,
    pub anonymous: bool,
    pub connected_at: DateTime<Utc>,
}

/// Registry of live sessions, shared through `AppState`
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection
    pub async fn connect(&self, user_id: Option<String>) -> Session {
        let id = Uuid::new_v4();
        let user_id = user_id.map(|raw| raw.trim().to_string()).filter(|raw| !raw.is_empty());
        let session = Session {
            id,
            anonymous: user_id.is_none(),
            identity: user_id.unwrap_or_else(|| format!("anon-{}", id.simple())),
            connected_at: Utc::now(),
        };
        self.sessions.write().await.insert(id, session.clone());
        session
    }

    /// Forget a connection; returns the session if it was registered
    pub async fn disconnect(&self, id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Identities of all connected sessions (one entry per connection)
    pub async fn identities(&self) -> Vec<String> {
        self.sessions
            .read()
            .await
            .values()
            .map(|session| session.identity.clone())
            .collect()
    }
}
