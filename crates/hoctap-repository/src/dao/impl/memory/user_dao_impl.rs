//! In-memory user DAO implementation.

use crate::{dao::UserDao, HealthProbe};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use hoctap_core::{HoctapError, HoctapResult, User, UserId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory user DAO.
///
/// Mirrors the MySQL table: auto-increment IDs starting at 1, a unique
/// email constraint, and `updated_at` that strictly advances on update.
#[derive(Debug, Default)]
pub struct InMemoryUserDaoImpl {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<UserId, User>,
}

impl InMemoryUserDaoImpl {
    /// Creates an empty DAO.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn email_taken(&self, email: &str, exclude: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != exclude)
    }
}

/// A timestamp strictly after `previous`.
fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl UserDao for InMemoryUserDaoImpl {
    async fn find_all(&self) -> HoctapResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.rows.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> HoctapResult<Option<User>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn count_by_email(&self, email: &str, exclude: Option<UserId>) -> HoctapResult<u64> {
        let state = self.state.read().await;
        let count = state
            .rows
            .values()
            .filter(|u| u.email == email && Some(u.id) != exclude)
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, name: &str, email: &str) -> HoctapResult<UserId> {
        let mut state = self.state.write().await;
        if state.email_taken(email, None) {
            return Err(HoctapError::email_taken(email));
        }

        state.last_id += 1;
        let id = UserId::new(state.last_id);
        let now = Utc::now();
        state.rows.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: UserId, name: &str, email: &str) -> HoctapResult<u64> {
        let mut state = self.state.write().await;
        if state.email_taken(email, Some(id)) {
            return Err(HoctapError::email_taken(email));
        }

        let Some(user) = state.rows.get_mut(&id) else {
            return Ok(0);
        };
        user.name = name.to_string();
        user.email = email.to_string();
        user.updated_at = advance(user.updated_at);
        Ok(1)
    }

    async fn delete(&self, id: UserId) -> HoctapResult<u64> {
        let removed = self.state.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn count(&self) -> HoctapResult<u64> {
        Ok(self.state.read().await.rows.len() as u64)
    }
}

#[async_trait]
impl HealthProbe for InMemoryUserDaoImpl {
    async fn health_check(&self) -> HoctapResult<()> {
        Ok(())
    }
}
