//! UserDao trait: single-statement access to user rows.
//!
//! Each method maps to exactly one statement against one data source.
//! Preconditions, probes and re-reads are composed one level up in
//! [`UserRepositoryImpl`].
//!
//! [`UserRepositoryImpl`]: crate::UserRepositoryImpl

use async_trait::async_trait;
use hoctap_core::{HoctapResult, User, UserId};

/// Low-level user data access object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Selects every row ordered by `created_at` descending.
    async fn find_all(&self) -> HoctapResult<Vec<User>>;

    /// Selects one row by ID.
    async fn find_by_id(&self, id: UserId) -> HoctapResult<Option<User>>;

    /// Counts rows holding `email`, skipping `exclude` when given.
    async fn count_by_email(&self, email: &str, exclude: Option<UserId>) -> HoctapResult<u64>;

    /// Inserts a row and returns the assigned ID.
    ///
    /// A duplicate email surfaces as `Conflict`.
    async fn insert(&self, name: &str, email: &str) -> HoctapResult<UserId>;

    /// Updates name, email and `updated_at`. Returns the affected row count.
    async fn update(&self, id: UserId, name: &str, email: &str) -> HoctapResult<u64>;

    /// Deletes a row. Returns the affected row count.
    async fn delete(&self, id: UserId) -> HoctapResult<u64>;

    /// Counts all rows.
    async fn count(&self) -> HoctapResult<u64>;
}
