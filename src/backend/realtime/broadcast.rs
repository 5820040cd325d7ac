/**
 * Real-time Event Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`, a multi-producer,
 * multi-consumer channel. Each WebSocket session holds one receiver, so every
 * session gets a copy of every event, the sender's own session included.
 */
use crate::shared::RealtimeEvent;
use tokio::sync::broadcast;

/// Sender half of the fan-out channel, cloned into every handler
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Create the fan-out channel with room for `capacity` undelivered events
pub fn channel(capacity: usize) -> RealtimeEventBroadcast {
    let (tx, _) = broadcast::channel(capacity);
    tx
}

/// Broadcast a real-time event to all subscribers
///
/// # Returns
///
/// Number of sessions the event was queued for (0 if nobody is connected)
pub async fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    let name = event.event_type.as_str();
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] {} broadcast to {} sessions", name, subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No sessions to receive {}", name);
            0
        }
    }
}
