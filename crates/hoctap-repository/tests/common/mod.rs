//! Common test infrastructure for database integration tests.

use hoctap_config::DatabaseConfig;
use hoctap_repository::DatabasePool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;

/// Test database container wrapper.
///
/// Manages a MySQL testcontainer lifecycle and provides a database pool
/// whose schema has already been created.
pub struct TestDatabase {
    _container: ContainerAsync<Mysql>,
    config: DatabaseConfig,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new test database with a fresh MySQL container.
    pub async fn new() -> Self {
        let container = Mysql::default()
            .with_env_var("MYSQL_ROOT_PASSWORD", "testpass")
            .with_env_var("MYSQL_DATABASE", "hoctap_test")
            .with_env_var("MYSQL_USER", "hoctap")
            .with_env_var("MYSQL_PASSWORD", "hoctap")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            user: "hoctap".to_string(),
            password: "hoctap".to_string(),
            name: "hoctap_test".to_string(),
            max_connections: 5,
            max_idle_connections: 1,
            ..DatabaseConfig::default()
        };

        let pool = Self::connect_with_retry(&config, 30).await;

        Self {
            _container: container,
            config,
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Returns the configuration the pool was opened with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> DatabasePool {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match DatabasePool::connect(config).await {
                Ok(pool) => return pool,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to database after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
