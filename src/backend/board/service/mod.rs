//! Board Mutation Service
//!
//! Every operation follows the same five steps:
//!
//! 1. resolve and validate the entities involved (`NotFound`, `ValidationError`)
//! 2. check the ownership guard (`AccessDenied`)
//! 3. apply the ordering engine to the in-memory documents
//! 4. persist the touched documents, one write each
//! 5. emit a fan-out event
//!
//! Failures in steps 1-3 return before anything is written. A store failure
//! in step 4 is returned as `StoreError` and no event is emitted.
//!
//! # Write Order
//!
//! Documents are written so that an interrupted operation leaves drift the
//! consistency sweep can repair without resurrecting deleted data:
//!
//! - create: child first, then the container's sequence
//! - delete: children first, then the container's sequence
//! - move:   source column, then task, then target column
//!
//! # Module Structure
//!
//! ```text
//! service/
//! ├── mod.rs      - BoardService and shared lookups
//! ├── boards.rs   - board CRUD and cascade delete
//! ├── columns.rs  - column CRUD and column reorder
//! ├── tasks.rs    - task CRUD, move and task reorder
//! └── users.rs    - account deletion cascade
//! ```

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::realtime::{broadcast_event, RealtimeEventBroadcast};
use crate::backend::store::EntityStore;
use crate::shared::models::{Board, Column, Task, User};
use crate::shared::RealtimeEvent;

mod boards;
mod columns;
mod tasks;
mod users;

/// Validates, authorizes, orders, persists and broadcasts board mutations
#[derive(Clone, Debug)]
pub struct BoardService {
    store: EntityStore,
    broadcast_tx: RealtimeEventBroadcast,
}

impl BoardService {
    pub fn new(store: EntityStore, broadcast_tx: RealtimeEventBroadcast) -> Self {
        Self { store, broadcast_tx }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    async fn emit(&self, event: RealtimeEvent) {
        broadcast_event(&self.broadcast_tx, event).await;
    }

    async fn load_board(&self, board_id: Uuid) -> Result<Board, BackendError> {
        self.store
            .get::<Board>(board_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Board", board_id))
    }

    /// A column that exists and belongs to `board`
    async fn load_column(&self, board: &Board, column_id: Uuid) -> Result<Column, BackendError> {
        match self.store.get::<Column>(column_id).await? {
            Some(column) if column.board_id == board.id => Ok(column),
            _ => Err(BackendError::not_found("Column", column_id)),
        }
    }

    /// A task that exists and belongs to `column`
    async fn load_task(&self, column: &Column, task_id: Uuid) -> Result<Task, BackendError> {
        match self.store.get::<Task>(task_id).await? {
            Some(task) if task.column_id == column.id => Ok(task),
            _ => Err(BackendError::not_found("Task", task_id)),
        }
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, BackendError> {
        self.store
            .get::<User>(user_id)
            .await?
            .ok_or_else(|| BackendError::not_found("User", user_id))
    }
}

/// Order `items` by their position in `ids`, dropping anything not listed
fn in_sequence_order<T>(ids: &[Uuid], items: Vec<T>, id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    let mut slots: Vec<Option<T>> = ids.iter().map(|_| None).collect();
    for item in items {
        if let Some(index) = ids.iter().position(|id| *id == id_of(&item)) {
            slots[index] = Some(item);
        }
    }
    slots.into_iter().flatten().collect()
}
