/**
 * In-Memory Document Store
 *
 * Selected when no `DATABASE_URL` is configured, and used by every test. The
 * whole store sits behind one `tokio::sync::RwLock`; each call takes the lock
 * once, so individual reads and writes are atomic but sequences of calls are
 * not, matching the guarantees of the PostgreSQL store.
 */
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{document_id, DocumentStore, EntityKind, Filter, StoreError};

type Collections = HashMap<EntityKind, HashMap<Uuid, Value>>;

/// Document store held entirely in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents of `kind`
    pub async fn count(&self, kind: EntityKind) -> usize {
        self.collections
            .read()
            .await
            .get(&kind)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, kind: EntityKind, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(&kind)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();
        Ok(docs)
    }

    async fn find_by_id(&self, kind: EntityKind, id: Uuid) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&kind).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn save(&self, kind: EntityKind, doc: Value) -> Result<Value, StoreError> {
        let id = document_id(kind, &doc)?;
        let mut collections = self.collections.write().await;
        collections.entry(kind).or_default().insert(id, doc.clone());
        Ok(doc)
    }

    async fn delete_by_id(&self, kind: EntityKind, id: Uuid) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(&kind) {
            docs.remove(&id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
