//! User DTOs.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Message returned when name or email is missing.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and email are required";

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
///
/// Missing fields deserialize as empty strings so they fail validation
/// with the same message as explicitly empty ones.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    /// Display name.
    #[validate(
        custom(function = "required"),
        length(max = 255, message = "name must be at most 255 characters")
    )]
    #[schema(example = "Ann", max_length = 255)]
    pub name: String,

    /// Email address, unique across users.
    #[validate(
        custom(function = "required"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    #[schema(example = "ann@example.com", max_length = 255)]
    pub email: String,
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed(REQUIRED_FIELDS_MESSAGE));
        return Err(error);
    }
    Ok(())
}

/// Data of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Application version.
    pub version: String,
    /// `healthy`, or `error: ...` when the database probe fails.
    pub database: String,
    /// RFC 3339 time of the check.
    pub timestamp: String,
}

/// Data of `GET /api/users/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    /// Number of stored users.
    pub total_users: u64,
    /// RFC 3339 time of the count.
    pub timestamp: String,
}

/// Data of `GET /welcome`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WelcomeData {
    /// Endpoint name to `METHOD path`.
    pub endpoints: BTreeMap<String, String>,
    pub database: String,
    pub documentation: String,
}
