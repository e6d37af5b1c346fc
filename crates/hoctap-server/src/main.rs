//! # HocTap Server
//!
//! Entry point for the HocTap user API.

use hoctap_config::ConfigLoader;
use hoctap_server::{logging, Application};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        ConfigLoader::from_default_location().load()
    });

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
                error!("Failed to load configuration: {}", e);
            });
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("{}", e);
    }

    info!("Starting HocTap server...");

    if let Err(e) = Application::new(config).run(shutdown_signal()).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
