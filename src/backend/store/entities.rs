/**
 * Entity Store Adapter
 *
 * Typed accessor over a [`DocumentStore`]. Each entity type knows its
 * `EntityKind`; the adapter serializes to and from JSON documents and offers
 * the handful of relationship queries the board service needs.
 *
 * Lists are returned in creation order.
 */
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::{DocumentStore, EntityKind, Filter, MemoryStore, StoreError};
use crate::shared::models::user::normalize_email;
use crate::shared::models::{Board, Column, Task, User};

/// A persisted document type
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Board {
    const KIND: EntityKind = EntityKind::Board;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Column {
    const KIND: EntityKind = EntityKind::Column;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Typed view of the durable store, cheap to clone
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("backend", &self.inner.backend_name())
            .finish()
    }
}

impl EntityStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { inner: store }
    }

    /// Adapter over a fresh in-memory store
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    pub async fn get<E: Entity>(&self, id: Uuid) -> Result<Option<E>, StoreError> {
        match self.inner.find_by_id(E::KIND, id).await? {
            Some(doc) => decode::<E>(doc).map(Some),
            None => Ok(None),
        }
    }

    pub async fn exists<E: Entity>(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.find_by_id(E::KIND, id).await?.is_some())
    }

    pub async fn save<E: Entity>(&self, entity: &E) -> Result<(), StoreError> {
        let doc = serde_json::to_value(entity).map_err(|e| StoreError::Corrupt {
            kind: E::KIND,
            id: entity.id().to_string(),
            message: e.to_string(),
        })?;
        self.inner.save(E::KIND, doc).await?;
        Ok(())
    }

    pub async fn delete<E: Entity>(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete_by_id(E::KIND, id).await
    }

    /// All entities matching `filter`, oldest first
    pub async fn find<E: Entity>(&self, filter: &Filter) -> Result<Vec<E>, StoreError> {
        let docs = self.inner.find(E::KIND, filter).await?;
        let mut entities = docs.into_iter().map(decode::<E>).collect::<Result<Vec<_>, _>>()?;
        entities.sort_by_key(|entity| (entity.created_at(), entity.id()));
        Ok(entities)
    }

    pub async fn all<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        self.find(&Filter::All).await
    }

    /// Columns whose `boardId` references `board_id`
    pub async fn columns_of_board(&self, board_id: Uuid) -> Result<Vec<Column>, StoreError> {
        self.find(&Filter::eq("boardId", board_id.to_string())).await
    }

    /// Tasks whose `columnId` references `column_id`
    pub async fn tasks_of_column(&self, column_id: Uuid) -> Result<Vec<Task>, StoreError> {
        self.find(&Filter::eq("columnId", column_id.to_string())).await
    }

    /// Boards the user created or is a member of
    pub async fn boards_for_user(&self, user_id: Uuid) -> Result<Vec<Board>, StoreError> {
        let user = user_id.to_string();
        self.find(&Filter::or(vec![
            Filter::eq("createdBy", user.clone()),
            Filter::contains("members", user),
        ]))
        .await
    }

    pub async fn tasks_assigned_to(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        self.find(&Filter::eq("assignedTo", user_id.to_string())).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut users: Vec<User> = self.find(&Filter::eq("email", normalize_email(email))).await?;
        Ok(users.pop())
    }
}

fn decode<E: Entity>(doc: Value) -> Result<E, StoreError> {
    let id = doc.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
    serde_json::from_value(doc).map_err(|e| {
        tracing::error!("[Store] undecodable {} document {}: {}", E::KIND, id, e);
        StoreError::Corrupt {
            kind: E::KIND,
            id,
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_typed_roundtrip() {
        let store = EntityStore::memory();
        let board = Board::new("Sprint", "", Uuid::new_v4(), &[]);
        store.save(&board).await.unwrap();

        let loaded: Board = store.get(board.id).await.unwrap().unwrap();
        assert_eq!(loaded, board);
        assert!(store.exists::<Board>(board.id).await.unwrap());
        assert!(!store.exists::<Column>(board.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_relationship_queries() {
        let store = EntityStore::memory();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let own = Board::new("Own", "", alice, &[]);
        let shared = Board::new("Shared", "", bob, &[alice]);
        let other = Board::new("Other", "", bob, &[]);
        for board in [&own, &shared, &other] {
            store.save(board).await.unwrap();
        }
        let todo = Column::new(own.id, "To Do", None);
        store.save(&todo).await.unwrap();
        store.save(&Task::new(todo.id, "t", "d", Utc::now())).await.unwrap();

        let boards = store.boards_for_user(alice).await.unwrap();
        let ids: Vec<Uuid> = boards.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&own.id) && ids.contains(&shared.id));
        assert_eq!(store.columns_of_board(own.id).await.unwrap().len(), 1);
        assert_eq!(store.tasks_of_column(todo.id).await.unwrap().len(), 1);
        assert!(store.columns_of_board(other.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_user_by_email_is_case_insensitive() {
        let store = EntityStore::memory();
        let user = User::new("alice", "alice@example.com", "hash".into());
        store.save(&user).await.unwrap();

        let found = store.find_user_by_email(" ALICE@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let raw = Arc::new(MemoryStore::new());
        let id = Uuid::new_v4();
        raw.save(EntityKind::Task, json!({"id": id, "title": 3})).await.unwrap();
        let store = EntityStore::new(raw);

        let result = store.get::<Task>(id).await;
        assert!(matches!(result, Err(StoreError::Corrupt { kind: EntityKind::Task, .. })));
    }
}
