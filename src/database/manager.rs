use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the relational store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps a unique-constraint violation onto `Conflict`, passing everything else through.
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::Conflict(format!("{} already exists", what))
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS products",
    "DROP TABLE IF EXISTS users",
];

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(100) NOT NULL UNIQUE,
        password VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS products_user_id_idx ON products (user_id)",
];

/// Serializes schema preparation across processes sharing a database
const SCHEMA_LOCK_KEY: i64 = 0x6361_7461_6c6f_67;

/// Pool construction and schema preparation
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        if config.url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect(&config.url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Creates the `users` and `products` tables when missing. With `reset`
    /// both tables are dropped first, discarding all data.
    pub async fn prepare_schema(pool: &PgPool, reset: bool) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        if reset {
            warn!("Dropping users and products tables (DATABASE_RESET_ON_STARTUP)");
            for &statement in DROP_TABLES {
                sqlx::query(statement).execute(&mut *tx).await?;
            }
        }

        for &statement in CREATE_TABLES {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        info!("Database schema ready");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
