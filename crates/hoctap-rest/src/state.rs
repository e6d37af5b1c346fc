//! Application state for Axum handlers.

use hoctap_repository::{in_memory_user_repository, HealthProbe, InMemoryUserDaoImpl, UserRepository};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn UserRepository>,
    pub database: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(repository: Arc<dyn UserRepository>, database: Arc<dyn HealthProbe>) -> Self {
        Self {
            repository,
            database,
        }
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryUserDaoImpl::new());
        Self {
            repository: in_memory_user_repository(store.clone()),
            database: store,
        }
    }
}
