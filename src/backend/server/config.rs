/**
 * Server Configuration
 *
 * Connects the optional PostgreSQL pool named by `DATABASE_URL`.
 *
 * # Error Handling
 *
 * Connection and migration failures are logged but do not prevent startup:
 * the server falls back to the in-memory store and keeps serving.
 */
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::AppConfig;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Connect to PostgreSQL and run migrations.
///
/// Returns `None` when no database URL is configured or the connection fails.
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("[Store] DATABASE_URL not set. Using the in-memory store; data will not survive restarts.");
        return None;
    };

    tracing::info!("[Store] Connecting to database...");
    let pool = match PgPoolOptions::new().max_connections(10).connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Store] Failed to create database connection pool: {:?}", e);
            tracing::warn!("[Store] Falling back to the in-memory store.");
            return None;
        }
    };
    tracing::info!("[Store] Database connection pool created successfully");

    tracing::info!("[Store] Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("[Store] Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("[Store] Failed to run database migrations: {}", e);
            tracing::warn!("[Store] Continuing without migrations; the schema might not be up to date");
        }
    }

    Some(pool)
}
