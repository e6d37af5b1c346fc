//! MySQL user DAO implementation.

use crate::{dao::UserDao, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hoctap_core::{HoctapError, HoctapResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;

/// MySQL user DAO implementation.
#[derive(Clone)]
pub struct MySqlUserDaoImpl {
    pool: Arc<DatabasePool>,
}

impl MySqlUserDaoImpl {
    /// Creates a new MySQL user DAO.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

impl std::fmt::Debug for MySqlUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserDaoImpl").finish_non_exhaustive()
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn to_count(value: i64) -> HoctapResult<u64> {
    u64::try_from(value).map_err(|_| HoctapError::query(format!("invalid row count {}", value)))
}

/// Maps a failed write; a duplicate key on the email index is the email conflict.
fn write_error(email: &str) -> impl Fn(sqlx::Error) -> HoctapError + '_ {
    move |e| match HoctapError::from(e) {
        HoctapError::Conflict(_) => HoctapError::email_taken(email),
        other => other,
    }
}

#[async_trait]
impl UserDao for MySqlUserDaoImpl {
    async fn find_all(&self) -> HoctapResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> HoctapResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn count_by_email(&self, email: &str, exclude: Option<UserId>) -> HoctapResult<u64> {
        let count: i64 = match exclude {
            Some(id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? AND id != ?")
                    .bind(email)
                    .bind(id.into_inner())
                    .fetch_one(self.pool.inner())
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
                    .bind(email)
                    .fetch_one(self.pool.inner())
                    .await?
            }
        };

        to_count(count)
    }

    async fn insert(&self, name: &str, email: &str) -> HoctapResult<UserId> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(self.pool.inner())
            .await
            .map_err(write_error(email))?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| {
            HoctapError::query(format!("insert id {} out of range", result.last_insert_id()))
        })?;
        Ok(UserId::new(id))
    }

    async fn update(&self, id: UserId, name: &str, email: &str) -> HoctapResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await
        .map_err(write_error(email))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: UserId) -> HoctapResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> HoctapResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        to_count(count)
    }
}
