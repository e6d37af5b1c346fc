//! # HocTap Repository
//!
//! Connection provider and user data access for the HocTap user API.
//!
//! ```text
//! REST handlers
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! UserRepositoryImpl            (repository impl: probes, re-reads)
//!   ↓  Arc<dyn UserDao>         (DAO interface)
//! MySqlUserDaoImpl              (DAO impl: one SQL statement per call)
//!   ↓  Arc<DatabasePool>
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   pool.rs                      ← DatabasePool, HealthProbe, schema
//!   traits.rs                    ← UserRepository trait
//!   impl/
//!     user_repository_impl.rs    ← UserRepositoryImpl
//!   dao/
//!     user_dao.rs                ← UserDao trait
//!     impl/
//!       mysql/user_dao_impl.rs   ← MySqlUserDaoImpl
//!       memory/user_dao_impl.rs  ← InMemoryUserDaoImpl
//! ```

pub mod dao;
pub mod pool;
pub mod traits;
pub mod r#impl;

pub use dao::{InMemoryUserDaoImpl, MySqlUserDaoImpl, UserDao};
pub use pool::*;
pub use r#impl::UserRepositoryImpl;
pub use traits::*;

use std::sync::Arc;

/// Builds a repository over the MySQL pool.
#[must_use]
pub fn mysql_user_repository(pool: Arc<DatabasePool>) -> Arc<dyn UserRepository> {
    Arc::new(UserRepositoryImpl::new(Arc::new(MySqlUserDaoImpl::new(pool))))
}

/// Builds a repository over an in-memory store. The caller keeps `store`
/// to use it as the health probe.
#[must_use]
pub fn in_memory_user_repository(store: Arc<InMemoryUserDaoImpl>) -> Arc<dyn UserRepository> {
    Arc::new(UserRepositoryImpl::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_repository_writes_to_given_store() {
        let store = Arc::new(InMemoryUserDaoImpl::new());
        let repository = in_memory_user_repository(store.clone());

        repository.create_user("Ann", "ann@x.com").await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.health_check().await.is_ok());
    }
}
