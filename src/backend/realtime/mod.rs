//! Real-time Fan-Out Module
//!
//! Every connected WebSocket session receives every event. There are no
//! topics, no filtering, no replay on reconnect and no deduplication.
//!
//! # Architecture
//!
//! - **`broadcast`** - the `tokio::sync::broadcast` channel and send helper
//! - **`sessions`** - registry of connected sessions (injected through `AppState`)
//! - **`socket`** - `GET /ws` upgrade handler and per-session relay loop
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── broadcast.rs - Event broadcasting utilities
//! ├── sessions.rs  - SessionRegistry
//! └── socket.rs    - WebSocket handler
//! ```
//!
//! # Event Sources
//!
//! 1. The board service, after a mutation has been persisted
//! 2. Clients, whose frames are renamed and relayed as-is
//!    (see [`rebroadcast`](crate::shared::event::rebroadcast))
//!
//! A session that falls more than the channel capacity behind skips the
//! oldest events and keeps going.

/// Event broadcasting utilities
pub mod broadcast;

/// Connected session registry
pub mod sessions;

/// WebSocket handler
pub mod socket;

pub use broadcast::{broadcast_event, RealtimeEventBroadcast};
pub use sessions::{Session, SessionRegistry};
pub use socket::handle_socket_upgrade;
