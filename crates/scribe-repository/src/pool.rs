//! Database connection pool management.

use crate::universal::Dialect;
use async_trait::async_trait;
use scribe_config::DatabaseConfig;
use scribe_core::{Interface, ScribeError, ScribeResult};
use shaku::Component;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::AnyPool;
use sqlx::ConnectOptions;
use std::str::FromStr;
use tracing::{info, warn};

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying pool.
    fn inner(&self) -> &AnyPool;

    /// Returns the SQL dialect of the connected database.
    fn dialect(&self) -> Dialect;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> ScribeResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper over sqlx's driver-agnostic `AnyPool`.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pub(crate) pool: AnyPool,
    pub(crate) dialect: Dialect,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// Alias: [`connect`](Self::connect)
    pub async fn new(config: &DatabaseConfig) -> ScribeResult<Self> {
        sqlx::any::install_default_drivers();

        let dialect = Dialect::from_url(&config.url)?;
        info!(%dialect, "Connecting to database...");

        let mut options = AnyConnectOptions::from_str(&config.url)
            .map_err(|e| ScribeError::Configuration(format!("Invalid database URL: {}", e)))?;
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        let mut pool_options = AnyPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(config.idle_timeout());
        if dialect == Dialect::Sqlite {
            // An in-memory SQLite database lives exactly as long as its connection.
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            ScribeError::Database(format!("Failed to connect: {}", e))
        })?;

        info!(%dialect, "Database connection pool established");
        Ok(Self { pool, dialect })
    }

    /// Creates a new database pool from configuration.
    ///
    /// This is an alias for [`new`](Self::new).
    pub async fn connect(config: &DatabaseConfig) -> ScribeResult<Self> {
        Self::new(config).await
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &AnyPool {
        &self.pool
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn health_check(&self) -> ScribeResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ScribeError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("dialect", &self.dialect)
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory_and_health_check() {
        let pool = DatabasePool::connect(&DatabaseConfig::in_memory_sqlite())
            .await
            .unwrap();
        assert_eq!(pool.dialect(), Dialect::Sqlite);
        assert!(pool.health_check().await.is_ok());

        pool.close().await;
        assert!(pool.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_url_is_configuration_error() {
        let config = DatabaseConfig {
            url: "redis://localhost:6379".to_string(),
            ..DatabaseConfig::in_memory_sqlite()
        };
        let err = DatabasePool::new(&config).await.unwrap_err();
        assert!(matches!(err, ScribeError::Configuration(_)));
    }
}
