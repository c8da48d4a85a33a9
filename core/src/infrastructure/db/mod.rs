use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::{error, info};

use crate::domain::common::{DatabaseConfig, entities::app_errors::CoreError};

pub mod schema;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub sql_logging: bool,
}

impl From<&DatabaseConfig> for StoreConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            database_url: config.database_url(),
            max_connections: config.max_connections,
            sql_logging: false,
        }
    }
}

/// Handle on the relational store.
///
/// Opened once at start-up and passed down; repositories receive clones of
/// the underlying pooled connection.
#[derive(Debug, Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub async fn connect(config: StoreConfig) -> Result<Self, CoreError> {
        let mut options = ConnectOptions::new(config.database_url);
        options
            .max_connections(config.max_connections.max(1))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(config.sql_logging);

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to connect to the database: {}", e);
            CoreError::Storage(format!("connect: {e}"))
        })?;

        info!(backend = ?db.get_database_backend(), "store connected");
        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub async fn apply_schema(&self) -> Result<(), CoreError> {
        schema::apply(&self.db).await
    }

    pub async fn close(self) -> Result<(), CoreError> {
        self.db.close().await.map_err(|e| {
            error!("Failed to close the database connection: {}", e);
            CoreError::Storage(format!("close: {e}"))
        })?;
        info!("store closed");
        Ok(())
    }
}

/// Logs `e` and wraps it as a storage error tagged with `action`.
pub(crate) fn storage_error(action: &'static str) -> impl Fn(DbErr) -> CoreError {
    move |e| {
        error!("Failed to {}: {}", action, e);
        CoreError::Storage(format!("{action}: {e}"))
    }
}

/// Maps a unique-constraint violation to `Conflict`, anything else to `Storage`.
pub(crate) fn conflict_or_storage(
    action: &'static str,
    conflict: impl Fn() -> String,
) -> impl Fn(DbErr) -> CoreError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            info!("Unique constraint hit while trying to {}: {}", action, detail);
            CoreError::Conflict(conflict())
        }
        _ => storage_error(action)(e),
    }
}
