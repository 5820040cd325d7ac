//! Durable Store Module
//!
//! The store is the only shared mutable resource of the server. It is a
//! plain document store: every entity is a JSON document addressed by
//! `(kind, id)`, written independently of every other document. There are
//! no multi-document transactions; callers order their writes instead.
//!
//! # Architecture
//!
//! - **`DocumentStore`** - the narrow collaborator interface
//!   (`find`, `find_by_id`, `save`, `delete_by_id`)
//! - **`memory`** - in-process implementation used when no database is configured and in tests
//! - **`postgres`** - PostgreSQL implementation over a single JSONB table
//! - **`entities`** - typed adapter (`EntityStore`) over any `DocumentStore`
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - DocumentStore trait, filters, errors
//! ├── memory.rs    - MemoryStore
//! ├── postgres.rs  - PgStore
//! └── entities.rs  - EntityStore typed accessor
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// In-memory document store
pub mod memory;

/// PostgreSQL document store
pub mod postgres;

/// Typed entity accessor
pub mod entities;

pub use entities::{Entity, EntityStore};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// The four persisted entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    User,
    Board,
    Column,
    Task,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Board => "board",
            EntityKind::Column => "column",
            EntityKind::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-by-field predicate over top-level document fields
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document of the kind
    All,
    /// `doc[field] == value`
    Eq { field: &'static str, value: Value },
    /// `doc[field]` is an array containing `value`
    Contains { field: &'static str, value: Value },
    /// Any of the nested filters matches
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq { field, value: value.into() }
    }

    pub fn contains(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::Contains { field, value: value.into() }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or(filters)
    }

    /// Evaluate the filter against a document
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => doc.get(*field) == Some(value),
            Filter::Contains { field, value } => doc
                .get(*field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be decoded into its entity type
    #[error("corrupt {kind} document {id}: {message}")]
    Corrupt {
        kind: EntityKind,
        id: String,
        message: String,
    },

    /// Document handed to `save` has no usable `id` field
    #[error("{kind} document has no valid id")]
    MissingId { kind: EntityKind },

    /// Store cannot serve requests right now
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Extract the `id` of a document
pub fn document_id(kind: EntityKind, doc: &Value) -> Result<Uuid, StoreError> {
    doc.get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or(StoreError::MissingId { kind })
}

/// Document store collaborator
///
/// Each call touches exactly one document (or reads a set of them). Writes are
/// whole-document replacements; the last `save` for an id wins.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// All documents of `kind` matching `filter`
    async fn find(&self, kind: EntityKind, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// The document with `id`, if any
    async fn find_by_id(&self, kind: EntityKind, id: Uuid) -> Result<Option<Value>, StoreError>;

    /// Insert or replace a document, returning what was stored
    async fn save(&self, kind: EntityKind, doc: Value) -> Result<Value, StoreError>;

    /// Delete a document; deleting a missing id is not an error
    async fn delete_by_id(&self, kind: EntityKind, id: Uuid) -> Result<(), StoreError>;

    /// Short name for logs
    fn backend_name(&self) -> &'static str;
}
