//! Ordering Engine Module
//!
//! Keeps the user-visible order of columns inside a board and of tasks inside
//! a column. Boards and columns are *containers*; each owns a versioned
//! [`Sequence`](crate::shared::Sequence) of child ids. Tasks are the only
//! *members* that can change container.
//!
//! # Architecture
//!
//! - **`engine`** - pure operations over containers (no I/O)
//!
//! The engine never touches the store. The board service loads documents,
//! calls the engine, then persists the mutated documents in the write order
//! the engine documents for each operation.
//!
//! # Operations
//!
//! | Operation       | Effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | `append`        | push to end, `DuplicateMember` if already present       |
//! | `remove`        | remove wherever it occurs, no-op if absent              |
//! | `reorder`       | replace the sequence, all ids must be current members   |
//! | `move_across`   | remove from source, retarget, insert clamped in target  |
//! | `reposition`    | move within one container                               |
//! | `cascade_delete`| drain all ids                                           |

use thiserror::Error;
use uuid::Uuid;

/// Container operations
pub mod engine;

pub use engine::{
    append, cascade_delete, check_version, move_across, parse_index, remove, reorder, reposition,
    Container, Member,
};

/// Ordering contract violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// The id is already part of the container's sequence
    #[error("{member} is already in this sequence")]
    DuplicateMember { member: Uuid },

    /// A proposed sequence references ids that are not current members
    #[error("invalid sequence: {message}")]
    InvalidSequence { message: String },

    /// A target index is negative or not a number
    #[error("invalid index: {message}")]
    InvalidIndex { message: String },

    /// The client's expected sequence version is stale
    #[error("sequence version conflict: expected {expected}, found {actual}")]
    Conflict { expected: u64, actual: u64 },
}

impl OrderingError {
    pub fn invalid_sequence(message: impl Into<String>) -> Self {
        Self::InvalidSequence { message: message.into() }
    }

    pub fn invalid_index(message: impl Into<String>) -> Self {
        Self::InvalidIndex { message: message.into() }
    }
}
