//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource name used in not-found errors.
pub const USER_RESOURCE: &str = "user";

/// A user row as storage currently holds it.
///
/// `id`, `created_at` and `updated_at` are always assigned by storage; the
/// application only ever supplies `name` and `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Storage-assigned identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address, unique across all users.
    pub email: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the row has never been updated since creation.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.created_at == self.updated_at
    }
}

/// Name and email for a user that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> NewUser<'a> {
    /// Creates a new user draft.
    #[must_use]
    pub const fn new(name: &'a str, email: &'a str) -> Self {
        Self { name, email }
    }
}

/// The fixed users inserted when the table is empty.
pub const DEFAULT_USERS: [NewUser<'static>; 3] = [
    NewUser::new("John Doe", "john@example.com"),
    NewUser::new("Jane Smith", "jane@example.com"),
    NewUser::new("Alice Johnson", "alice@example.com"),
];
