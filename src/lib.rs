//! Taskboard - Main Library
//!
//! A collaborative Kanban board backend: boards hold ordered columns, columns
//! hold ordered tasks, and every change made over HTTP is pushed to all
//! connected WebSocket clients.
//!
//! # Overview
//!
//! - Ordering engine that keeps each board's column sequence and each
//!   column's task sequence consistent with the documents that point back
//! - Ownership guard separating the board creator from members
//! - Document store over PostgreSQL (JSONB) with an in-memory fallback
//! - Global, topic-free WebSocket fan-out with an injected session registry
//! - JWT bearer authentication with bcrypt-hashed passwords
//!
//! # Module Structure
//!
//! - **`shared`** - Documents, events, configuration and validation errors
//!   - `Board`, `Column`, `Task`, `User`, versioned `Sequence`
//!   - `RealtimeEvent` and the `{event, data}` wire frame
//!   - `AppConfig` (defaults, TOML file, environment)
//!
//! - **`backend`** - Server-side code
//!   - axum router, middleware and handlers
//!   - `BoardService` mutation pipeline
//!   - store backends and the consistency sweep
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::backend::server::create_app;
//! use taskboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency Model
//!
//! Each request is applied as a sequence of single-document writes with no
//! transaction around them. Concurrent reorders of the same container are
//! last-write-wins unless the client sends `expectedVersion`. Drift left by
//! an interrupted write is repaired by `backend::consistency::reconcile`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
