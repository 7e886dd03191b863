/**
 * Store Configuration
 *
 * This module selects and initializes the entity store.
 *
 * # Configuration Sources
 *
 * `DATABASE_URL` (through `AppConfig`) selects PostgreSQL. Without it, or if
 * the connection fails, the server runs on the in-memory store so it can
 * still start for local development.
 */

use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::store::{MemoryStore, PostgresStore, SocialStore};
use crate::shared::AppConfig;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `DATABASE_URL` is not set or connection fails
pub async fn load_database(config: &AppConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Data will be kept in memory only.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - schema might not be up to date");
        }
    }

    Some(pool)
}

/// Build the store the server will use
pub async fn load_store(config: &AppConfig) -> Arc<dyn SocialStore> {
    match load_database(config).await {
        Some(pool) => Arc::new(PostgresStore::new(pool)),
        None => {
            if config.production {
                tracing::error!("Running in production without a database; data will not persist");
            }
            tracing::warn!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}
