//! Application lifecycle.

use crate::startup::{print_banner, print_startup_info};
use axum::Router;
use hoctap_config::AppConfig;
use hoctap_core::{HoctapError, HoctapResult};
use hoctap_repository::{mysql_user_repository, DatabasePool};
use hoctap_rest::{create_router, AppState};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The HocTap server, wired from configuration.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Creates an application from loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Connects to the database, seeds defaults and serves until `shutdown`
    /// completes. The pool is closed before returning.
    pub async fn run<F>(self, shutdown: F) -> HoctapResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        print_banner();
        info!("Version: {}", env!("CARGO_PKG_VERSION"));
        info!("Environment: {}", self.config.app.environment);
        info!(
            "Connecting to database {}",
            self.config.database.display_target()
        );

        let pool = Arc::new(DatabasePool::connect(&self.config.database).await?);
        info!("Database connection established");

        let repository = mysql_user_repository(pool.clone());
        if let Err(e) = repository.seed_defaults().await {
            warn!("Failed to seed default users: {}", e);
        }

        let state = AppState::new(repository, pool.clone());
        let router = create_router(state, &self.config.server);

        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| HoctapError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&self.config.server);

        let result = serve(listener, router, shutdown).await;

        pool.close().await;
        info!("Server shutdown complete");
        result
    }
}

/// Serves `router` on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> HoctapResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HoctapError::internal(format!("Server error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoctap_config::ServerConfig;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
        sync::oneshot,
    };

    #[test]
    fn test_application_keeps_config() {
        let mut config = AppConfig::default();
        config.server.port = 9000;

        let app = Application::new(config);
        assert_eq!(app.config().server.port, 9000);
    }

    #[tokio::test]
    async fn test_serve_answers_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = create_router(AppState::in_memory(), &ServerConfig::default());
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(listener, router, async {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("API is running successfully"));

        tx.send(()).unwrap();
        assert!(server.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_run_fails_on_unreachable_database() {
        let mut config = AppConfig::default();
        config.database.host = "127.0.0.1".to_string();
        config.database.port = 1;
        config.database.connect_timeout_secs = 2;

        let result = Application::new(config).run(async {}).await;

        assert!(matches!(result, Err(HoctapError::Connection(_))));
    }
}
