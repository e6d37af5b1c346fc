//! Repository trait definitions.

use async_trait::async_trait;
use hoctap_core::{HoctapResult, User, UserId};

/// User repository trait.
///
/// Callers pass already validated, non-empty `name` and `email` values.
/// Failures are returned as typed [`hoctap_core::HoctapError`] variants and
/// are never logged here.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users, newest first.
    async fn list_users(&self) -> HoctapResult<Vec<User>>;

    /// Finds a user by ID, failing with `NotFound` when absent.
    async fn get_user(&self, id: UserId) -> HoctapResult<User>;

    /// Creates a user and returns the stored row.
    async fn create_user(&self, name: &str, email: &str) -> HoctapResult<User>;

    /// Replaces name and email of an existing user and returns the stored row.
    async fn update_user(&self, id: UserId, name: &str, email: &str) -> HoctapResult<User>;

    /// Deletes a user by ID.
    async fn delete_user(&self, id: UserId) -> HoctapResult<()>;

    /// Counts all users.
    async fn count_users(&self) -> HoctapResult<u64>;

    /// Inserts the default users when the table is empty.
    async fn seed_defaults(&self) -> HoctapResult<()>;
}
