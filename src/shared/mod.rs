//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the HTTP API, the realtime channel and the store. All types are designed
//! for JSON serialization.

/// Board, column, task and user documents
pub mod models;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use event::{EventType, RealtimeEvent, WireFrame};
pub use models::{Board, Color, Column, Role, Sequence, Task, TaskStatus, User};
