//! Backend Module
//!
//! All server-side code for the taskboard: the axum HTTP server, the board
//! mutation service, the ordering engine, persistence and the WebSocket
//! fan-out channel.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, profile, JWT and bcrypt
//! - **`board`** - Board/column/task types, `BoardService` and handlers
//! - **`ordering`** - Pure sequence operations over boards and columns
//! - **`ownership`** - Read/structure/content access predicates
//! - **`store`** - Document store trait with Postgres and in-memory backends
//! - **`consistency`** - Drift repair between sequences and back-references
//! - **`realtime`** - Broadcast channel, session registry, WebSocket handler
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Accounts and tokens
//! ├── board/          - Boards, columns, tasks
//! ├── ordering/       - Ordering engine
//! ├── ownership.rs    - Ownership guard
//! ├── store/          - Document persistence
//! ├── consistency.rs  - Reconcile sweep
//! ├── realtime/       - Event fan-out
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! A mutation arrives over HTTP, passes `auth_middleware`, and reaches a
//! handler that calls `BoardService`. The service resolves the documents,
//! checks ownership, applies the ordering engine, writes each touched
//! document, then emits a `RealtimeEvent` that every connected WebSocket
//! session receives.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Boards, columns and tasks
pub mod board;

/// Container ordering engine
pub mod ordering;

/// Ownership guard
pub mod ownership;

/// Document persistence
pub mod store;

/// Drift repair
pub mod consistency;

pub use board::BoardService;
pub use error::BackendError;
pub use realtime::{broadcast_event, RealtimeEventBroadcast};
pub use server::create_app;
