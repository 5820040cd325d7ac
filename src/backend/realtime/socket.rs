/**
 * WebSocket Handler
 *
 * `GET /ws?userId=<id>` upgrades to a WebSocket. Each session runs two tasks:
 *
 * - **outbound**: forwards every broadcast event as an `{event, data}` text frame
 * - **inbound**: decodes client frames and relays known events to everyone
 *
 * When either side ends, the other is aborted and the session is removed
 * from the registry. Mutations the client started over HTTP still complete
 * and are broadcast to the remaining sessions.
 */
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::realtime::broadcast::{broadcast_event, RealtimeEventBroadcast};
use crate::backend::realtime::sessions::SessionRegistry;
use crate::shared::event::{rebroadcast, WireFrame};

/// Handshake query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SocketQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Handle `GET /ws`
pub async fn handle_socket_upgrade(
    ws: WebSocketUpgrade,
    Query(query): Query<SocketQuery>,
    State(broadcast_tx): State<RealtimeEventBroadcast>,
    State(registry): State<SessionRegistry>,
) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, query.user_id, broadcast_tx, registry))
}

async fn run_session(
    socket: WebSocket,
    user_id: Option<String>,
    broadcast_tx: RealtimeEventBroadcast,
    registry: SessionRegistry,
) {
    // subscribed before the session becomes visible in the registry
    let mut events = broadcast_tx.subscribe();
    let session = registry.connect(user_id).await;
    tracing::info!(
        "[Realtime] {} connected ({} sessions)",
        session.identity,
        registry.len().await
    );

    let (mut sink, mut stream) = socket.split();

    let identity = session.identity.clone();
    let mut outbound = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let text = match serde_json::to_string(&event.to_frame()) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] {} lagged, skipped {} events", identity, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let origin = session.identity.clone();
    let relay_tx = broadcast_tx.clone();
    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => {
                    relay_frame(&relay_tx, &origin, text.as_str()).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut outbound => inbound.abort(),
        _ = &mut inbound => outbound.abort(),
    }

    registry.disconnect(session.id).await;
    tracing::info!(
        "[Realtime] {} disconnected ({} sessions)",
        session.identity,
        registry.len().await
    );
}

/// Decode a client frame and rebroadcast it.
///
/// Returns the number of sessions reached, or `None` when the frame was
/// undecodable or named an unknown event.
pub async fn relay_frame(broadcast_tx: &RealtimeEventBroadcast, origin: &str, text: &str) -> Option<usize> {
    let frame: WireFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!("[Realtime] Dropping undecodable frame from {}: {}", origin, e);
            return None;
        }
    };
    let name = frame.event.clone();
    let Some(event) = rebroadcast(frame) else {
        tracing::debug!("[Realtime] Ignoring unknown event '{}' from {}", name, origin);
        return None;
    };
    tracing::debug!("[Realtime] Relaying {} from {} as {}", name, origin, event.event_type.as_str());
    Some(broadcast_event(broadcast_tx, event.with_origin(origin)).await)
}
