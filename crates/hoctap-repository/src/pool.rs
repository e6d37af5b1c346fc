//! Database connection pool management.

use async_trait::async_trait;
use hoctap_config::DatabaseConfig;
use hoctap_core::{HoctapError, HoctapResult};
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions},
    ConnectOptions,
};
use tracing::{info, warn};

/// Idempotent definition of the `users` table.
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
"#;

/// Liveness probe for the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Checks if the store answers a round trip.
    async fn health_check(&self) -> HoctapResult<()>;
}

/// Database pool wrapper.
///
/// One instance lives for the whole process. It is created by the
/// composition root and shared behind an `Arc`.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Opens the pool, verifies liveness and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// [`HoctapError::Connection`] when the handshake or the `SELECT 1` probe
    /// fails, [`HoctapError::Schema`] when the table cannot be created.
    pub async fn connect(config: &DatabaseConfig) -> HoctapResult<Self> {
        info!("Connecting to MySQL database at {}...", config.display_target());

        let pool = pool_options(config)
            .connect_with(connect_options(config))
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                HoctapError::Connection(format!("failed to connect: {}", e))
            })?;
        let pool = Self { pool };

        pool.health_check()
            .await
            .map_err(|e| HoctapError::Connection(e.to_string()))?;
        info!(
            "MySQL connection pool established (max {}, idle {})",
            config.max_connections, config.max_idle_connections
        );

        pool.ensure_schema().await?;
        Ok(pool)
    }

    /// Wraps an already opened pool. No probe or schema check is run.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Creates the `users` table if it is not present.
    pub async fn ensure_schema(&self) -> HoctapResult<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| HoctapError::Schema(format!("failed to create users table: {}", e)))?;
        info!("Users table is ready");
        Ok(())
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> HoctapResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| HoctapError::query(format!("health check failed: {}", e)))?;
        Ok(())
    }

    /// Closes the database pool. Calling it again is a no-op.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthProbe for DatabasePool {
    async fn health_check(&self) -> HoctapResult<()> {
        DatabasePool::health_check(self).await
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Builds connection options from configuration.
///
/// Statement logging stays off unless `log_queries` is set.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .charset("utf8mb4");

    if config.log_queries {
        options
    } else {
        options.disable_statement_logging()
    }
}

/// Builds pool sizing from configuration.
///
/// sqlx has no idle ceiling; `max_idle_connections` becomes the floor of
/// warm connections and `idle_timeout` reaps anything above it.
#[must_use]
pub fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.max_idle_connections.min(config.max_connections))
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(Some(config.idle_timeout()))
}
