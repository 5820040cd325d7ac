/**
 * PostgreSQL Document Store
 *
 * All entity kinds share one JSONB table (see `migrations/`). Filters are
 * translated to JSONB operators:
 *
 * - `Filter::Eq`       → `body -> 'field' = $value`
 * - `Filter::Contains` → `body -> 'field' @> '[value]'`
 * - `Filter::Or`       → `( .. OR .. )`
 *
 * Field names and values are always bound as parameters.
 */
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{document_id, DocumentStore, EntityKind, Filter, StoreError};

/// Document store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Query parameter produced while rendering a filter
#[derive(Debug, Clone, PartialEq)]
enum Bind {
    Text(String),
    Json(Value),
}

/// Render `filter` as a SQL predicate. `$1` is reserved for the kind.
fn render_filter(filter: &Filter, sql: &mut String, binds: &mut Vec<Bind>) {
    match filter {
        Filter::All => sql.push_str("TRUE"),
        Filter::Eq { field, value } => {
            let field = placeholder(binds, Bind::Text(field.to_string()));
            let value = placeholder(binds, Bind::Json(value.clone()));
            sql.push_str(&format!("body -> {} = {}", field, value));
        }
        Filter::Contains { field, value } => {
            let field = placeholder(binds, Bind::Text(field.to_string()));
            let value = placeholder(binds, Bind::Json(json!([value])));
            sql.push_str(&format!("body -> {} @> {}", field, value));
        }
        Filter::Or(filters) if filters.is_empty() => sql.push_str("FALSE"),
        Filter::Or(filters) => {
            sql.push('(');
            for (i, nested) in filters.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" OR ");
                }
                render_filter(nested, sql, binds);
            }
            sql.push(')');
        }
    }
}

fn placeholder(binds: &mut Vec<Bind>, bind: Bind) -> String {
    binds.push(bind);
    format!("${}", binds.len() + 1)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find(&self, kind: EntityKind, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let mut predicate = String::new();
        let mut binds = Vec::new();
        render_filter(filter, &mut predicate, &mut binds);
        let sql = format!(
            "SELECT body FROM documents WHERE kind = $1 AND {} ORDER BY body ->> 'createdAt'",
            predicate
        );

        let mut query = sqlx::query_as::<_, (Json<Value>,)>(&sql).bind(kind.as_str());
        for bind in binds {
            query = match bind {
                Bind::Text(text) => query.bind(text),
                Bind::Json(value) => query.bind(Json(value)),
            };
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("[Store] find {} failed: {:?}", kind, e);
            StoreError::from(e)
        })?;
        Ok(rows.into_iter().map(|(Json(body),)| body).collect())
    }

    async fn find_by_id(&self, kind: EntityKind, id: Uuid) -> Result<Option<Value>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT body FROM documents WHERE kind = $1 AND id = $2",
        )
        .bind(kind.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(body),)| body))
    }

    async fn save(&self, kind: EntityKind, doc: Value) -> Result<Value, StoreError> {
        let id = document_id(kind, &doc)?;
        sqlx::query(
            r#"
            INSERT INTO documents (kind, id, body, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (kind, id) DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(kind.as_str())
        .bind(id)
        .bind(Json(&doc))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("[Store] save {} {} failed: {:?}", kind, id, e);
            StoreError::from(e)
        })?;
        Ok(doc)
    }

    async fn delete_by_id(&self, kind: EntityKind, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
