//! Board Domain Models
//!
//! Document types for the four entity kinds persisted by the store: users,
//! boards, columns and tasks. Field names serialize in camelCase, which is
//! also the shape the HTTP API and the realtime payloads use.
//!
//! Boards and columns are *containers*: each carries a versioned
//! [`Sequence`] of child ids that defines display order. The reverse
//! reference (`Column::board_id`, `Task::column_id`) must always agree with
//! sequence membership; the ordering engine is responsible for keeping it so.

/// Versioned ordering sequence
pub mod sequence;

/// Registered users
pub mod user;

/// Boards (containers of columns)
pub mod board;

/// Columns (containers of tasks)
pub mod column;

/// Tasks
pub mod task;

pub use board::Board;
pub use column::{Color, Column};
pub use sequence::Sequence;
pub use task::{Task, TaskStatus};
pub use user::{Role, User};
