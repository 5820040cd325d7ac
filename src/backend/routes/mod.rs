//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Main router creation, CORS, tracing, fallback
//! ├── realtime_routes.rs  - WebSocket upgrade and health check
//! └── api_routes.rs       - Account and board endpoints
//! ```
//!
//! Account and board routes except register/login sit behind
//! `auth_middleware`. `/ws` has no authentication; a session's identity is
//! whatever `userId` query parameter it supplies.

/// Main router creation
pub mod router;

/// WebSocket and health routes
pub mod realtime_routes;

/// Account and board routes
pub mod api_routes;

pub use router::create_router;
