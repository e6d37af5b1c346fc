//! `UserRepositoryImpl`: Repository layer implementation.
//!
//! Implements the [`UserRepository`] domain interface on top of a
//! [`UserDao`].
//!
//! ```text
//! REST handlers
//!   ↓ Arc<dyn UserRepository>
//! UserRepositoryImpl          ← probes, existence checks, re-reads
//!   ↓ Arc<dyn UserDao>
//! MySqlUserDaoImpl / InMemoryUserDaoImpl
//! ```
//!
//! Uniqueness is probed before every write. Two writers can both pass the
//! probe; the storage unique index then rejects the loser, which still
//! surfaces as `Conflict`.
//!
//! [`UserRepository`]: crate::traits::UserRepository
//! [`UserDao`]: crate::dao::UserDao

use crate::{dao::UserDao, traits::UserRepository};
use async_trait::async_trait;
use hoctap_core::{HoctapError, HoctapResult, User, UserId, DEFAULT_USERS, USER_RESOURCE};
use std::sync::Arc;

/// Repository implementation that orchestrates [`UserDao`] access.
///
/// [`UserDao`]: crate::dao::UserDao
pub struct UserRepositoryImpl {
    user_dao: Arc<dyn UserDao>,
}

impl UserRepositoryImpl {
    /// Creates a new `UserRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>) -> Self {
        Self { user_dao }
    }

    async fn ensure_email_free(&self, email: &str, exclude: Option<UserId>) -> HoctapResult<()> {
        if self.user_dao.count_by_email(email, exclude).await? > 0 {
            return Err(HoctapError::email_taken(email));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn list_users(&self) -> HoctapResult<Vec<User>> {
        self.user_dao.find_all().await
    }

    async fn get_user(&self, id: UserId) -> HoctapResult<User> {
        self.user_dao
            .find_by_id(id)
            .await?
            .ok_or_else(|| HoctapError::not_found(USER_RESOURCE, id))
    }

    async fn create_user(&self, name: &str, email: &str) -> HoctapResult<User> {
        self.ensure_email_free(email, None).await?;
        let id = self.user_dao.insert(name, email).await?;
        self.get_user(id).await
    }

    async fn update_user(&self, id: UserId, name: &str, email: &str) -> HoctapResult<User> {
        self.get_user(id).await?;
        self.ensure_email_free(email, Some(id)).await?;

        if self.user_dao.update(id, name, email).await? == 0 {
            return Err(HoctapError::not_found(USER_RESOURCE, id));
        }
        self.get_user(id).await
    }

    async fn delete_user(&self, id: UserId) -> HoctapResult<()> {
        self.get_user(id).await?;

        if self.user_dao.delete(id).await? == 0 {
            return Err(HoctapError::not_found(USER_RESOURCE, id));
        }
        Ok(())
    }

    async fn count_users(&self) -> HoctapResult<u64> {
        self.user_dao.count().await
    }

    async fn seed_defaults(&self) -> HoctapResult<()> {
        if self.user_dao.count().await? > 0 {
            return Ok(());
        }

        for user in &DEFAULT_USERS {
            self.create_user(user.name, user.email).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{InMemoryUserDaoImpl, MockUserDao};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn in_memory_repo() -> UserRepositoryImpl {
        UserRepositoryImpl::new(Arc::new(InMemoryUserDaoImpl::new()))
    }

    fn mock_repo(dao: MockUserDao) -> UserRepositoryImpl {
        UserRepositoryImpl::new(Arc::new(dao))
    }

    fn stored_user(id: i64, name: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Behaviour against the in-memory store
    // =========================================================================

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let repo = in_memory_repo();

        let user = repo.create_user("Ann", "ann@x.com").await.unwrap();

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@x.com");
        assert!(user.id.into_inner() > 0);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let repo = in_memory_repo();
        repo.create_user("Ann", "ann@x.com").await.unwrap();

        let err = repo.create_user("Bob", "ann@x.com").await.unwrap_err();

        assert!(matches!(err, HoctapError::Conflict(_)));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_matches_create_result() {
        let repo = in_memory_repo();
        let created = repo.create_user("Ann", "ann@x.com").await.unwrap();

        let fetched = repo.get_user(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = in_memory_repo();

        let err = repo.get_user(UserId::new(999)).await.unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { resource_type: "user", .. }));
        assert_eq!(err.to_string(), "user with ID 999 not found");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = in_memory_repo();
        let ann = repo.create_user("Ann", "ann@x.com").await.unwrap();
        let bob = repo.create_user("Bob", "bob@x.com").await.unwrap();

        let users = repo.list_users().await.unwrap();

        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![bob.id, ann.id]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = in_memory_repo();
        assert!(repo.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = in_memory_repo();
        repo.create_user("Ann", "ann@x.com").await.unwrap();

        let err = repo
            .update_user(UserId::new(42), "Ann", "ann@x.com")
            .await
            .unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_name_only_keeps_email_and_advances_timestamp() {
        let repo = in_memory_repo();
        let created = repo.create_user("Ann", "ann@x.com").await.unwrap();

        let updated = repo
            .update_user(created.id, "Ann K.", "ann@x.com")
            .await
            .unwrap();

        assert_eq!(updated.name, "Ann K.");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_other_users_email_conflicts() {
        let repo = in_memory_repo();
        let ann = repo.create_user("Ann", "ann@x.com").await.unwrap();
        repo.create_user("Bob", "bob@x.com").await.unwrap();

        let err = repo.update_user(ann.id, "Ann", "bob@x.com").await.unwrap_err();

        assert!(matches!(err, HoctapError::Conflict(_)));
        assert_eq!(repo.get_user(ann.id).await.unwrap().email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = in_memory_repo();
        let created = repo.create_user("Ann", "ann@x.com").await.unwrap();

        repo.delete_user(created.id).await.unwrap();

        let err = repo.get_user(created.id).await.unwrap_err();
        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = in_memory_repo();

        let err = repo.delete_user(UserId::new(5)).await.unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_matches_list_length() {
        let repo = in_memory_repo();
        for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@x.com")] {
            repo.create_user(name, email).await.unwrap();
        }

        let count = repo.count_users().await.unwrap();
        let listed = repo.list_users().await.unwrap().len() as u64;

        assert_eq!(count, 3);
        assert_eq!(count, listed);
    }

    #[tokio::test]
    async fn test_seed_defaults_is_idempotent() {
        let repo = in_memory_repo();

        repo.seed_defaults().await.unwrap();
        repo.seed_defaults().await.unwrap();

        assert_eq!(repo.count_users().await.unwrap(), 3);
        let emails: Vec<String> = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert!(emails.contains(&"john@example.com".to_string()));
        assert!(emails.contains(&"jane@example.com".to_string()));
        assert!(emails.contains(&"alice@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_seed_defaults_skips_non_empty_table() {
        let repo = in_memory_repo();
        repo.create_user("Ann", "ann@x.com").await.unwrap();

        repo.seed_defaults().await.unwrap();

        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let repo = in_memory_repo();

        let ann = repo.create_user("Ann", "ann@x.com").await.unwrap();
        assert_eq!(ann.id, UserId::new(1));

        let err = repo.create_user("Bob", "ann@x.com").await.unwrap_err();
        assert!(matches!(err, HoctapError::Conflict(_)));

        let updated = repo
            .update_user(ann.id, "Ann K.", "ann2@x.com")
            .await
            .unwrap();
        assert_eq!(updated.email, "ann2@x.com");
        assert!(updated.updated_at > ann.updated_at);

        repo.delete_user(ann.id).await.unwrap();
        let err = repo.get_user(ann.id).await.unwrap_err();
        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    // =========================================================================
    // Failure propagation with a mocked DAO
    // =========================================================================

    #[tokio::test]
    async fn test_create_probe_failure_skips_insert() {
        let mut dao = MockUserDao::new();
        dao.expect_count_by_email()
            .returning(|_, _| Err(HoctapError::query("lost connection")));
        dao.expect_insert().never();

        let err = mock_repo(dao).create_user("Ann", "ann@x.com").await.unwrap_err();

        assert!(matches!(err, HoctapError::Query(_)));
    }

    #[tokio::test]
    async fn test_create_insert_conflict_is_surfaced() {
        let mut dao = MockUserDao::new();
        dao.expect_count_by_email().returning(|_, _| Ok(0));
        dao.expect_insert()
            .returning(|_, email| Err(HoctapError::email_taken(email)));

        let err = mock_repo(dao).create_user("Ann", "ann@x.com").await.unwrap_err();

        assert!(matches!(err, HoctapError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rereads_inserted_row() {
        let mut dao = MockUserDao::new();
        dao.expect_count_by_email()
            .withf(|email, exclude| email == "ann@x.com" && exclude.is_none())
            .returning(|_, _| Ok(0));
        dao.expect_insert().returning(|_, _| Ok(UserId::new(7)));
        dao.expect_find_by_id()
            .with(eq(UserId::new(7)))
            .times(1)
            .returning(|id| Ok(Some(stored_user(id.into_inner(), "Ann", "ann@x.com"))));

        let user = mock_repo(dao).create_user("Ann", "ann@x.com").await.unwrap();

        assert_eq!(user.id, UserId::new(7));
    }

    #[tokio::test]
    async fn test_update_probe_excludes_own_id() {
        let mut dao = MockUserDao::new();
        dao.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.into_inner(), "Ann", "ann@x.com"))));
        dao.expect_count_by_email()
            .withf(|_, exclude| *exclude == Some(UserId::new(3)))
            .returning(|_, _| Ok(0));
        dao.expect_update().returning(|_, _, _| Ok(1));

        let user = mock_repo(dao)
            .update_user(UserId::new(3), "Ann", "ann@x.com")
            .await
            .unwrap();

        assert_eq!(user.id, UserId::new(3));
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_not_found() {
        let mut dao = MockUserDao::new();
        dao.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.into_inner(), "Ann", "ann@x.com"))));
        dao.expect_count_by_email().returning(|_, _| Ok(0));
        dao.expect_update().returning(|_, _, _| Ok(0));

        let err = mock_repo(dao)
            .update_user(UserId::new(3), "Ann", "ann@x.com")
            .await
            .unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_never_probes() {
        let mut dao = MockUserDao::new();
        dao.expect_find_by_id().returning(|_| Ok(None));
        dao.expect_count_by_email().never();
        dao.expect_update().never();

        let err = mock_repo(dao)
            .update_user(UserId::new(3), "Ann", "ann@x.com")
            .await
            .unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let mut dao = MockUserDao::new();
        dao.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.into_inner(), "Ann", "ann@x.com"))));
        dao.expect_delete().returning(|_| Ok(0));

        let err = mock_repo(dao).delete_user(UserId::new(3)).await.unwrap_err();

        assert!(matches!(err, HoctapError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_query_error_is_surfaced() {
        let mut dao = MockUserDao::new();
        dao.expect_find_by_id()
            .returning(|_| Err(HoctapError::query("timeout")));
        dao.expect_delete().never();

        let err = mock_repo(dao).delete_user(UserId::new(3)).await.unwrap_err();

        assert!(matches!(err, HoctapError::Query(_)));
    }

    #[tokio::test]
    async fn test_seed_first_failure_aborts_rest() {
        let mut dao = MockUserDao::new();
        dao.expect_count().returning(|| Ok(0));
        dao.expect_count_by_email().returning(|_, _| Ok(0));
        dao.expect_insert()
            .times(1)
            .returning(|_, _| Err(HoctapError::query("disk full")));

        let err = mock_repo(dao).seed_defaults().await.unwrap_err();

        assert!(matches!(err, HoctapError::Query(_)));
    }

    #[tokio::test]
    async fn test_seed_count_failure_is_surfaced() {
        let mut dao = MockUserDao::new();
        dao.expect_count()
            .returning(|| Err(HoctapError::query("gone away")));
        dao.expect_insert().never();

        assert!(mock_repo(dao).seed_defaults().await.is_err());
    }
}
