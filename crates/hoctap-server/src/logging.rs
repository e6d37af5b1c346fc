//! Tracing subscriber setup.

use hoctap_config::ObservabilityConfig;
use hoctap_core::{HoctapError, HoctapResult};
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives appended to the configured base level.
const CRATE_DIRECTIVES: &str = "hoctap=debug,tower_http=debug";

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    format!("{},{}", level, CRATE_DIRECTIVES)
}

/// `RUST_LOG` if set, otherwise the default directives for `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Subscriber used while configuration is still being loaded.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_target(true)
        .finish()
}

/// Installs the global subscriber, pretty or JSON per configuration.
pub fn init_logging(config: &ObservabilityConfig) -> HoctapResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(&config.log_level));

    let result = if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| HoctapError::internal(format!("Failed to initialise logging: {}", e)))
}
