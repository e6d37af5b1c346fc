//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for HocTap.
///
/// The set of variants is closed: callers classify failures by matching on
/// the variant, never by inspecting the rendered message.
#[derive(Error, Debug)]
pub enum HoctapError {
    // ============ Startup Errors ============
    /// The database could not be reached or rejected the handshake.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The schema could not be created after a successful connection.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} with ID {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Conflict error (e.g., duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Any unexpected storage failure.
    #[error("Query error: {0}")]
    Query(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HoctapError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Connection(_)
            | Self::Schema(_)
            | Self::Configuration(_)
            | Self::Query(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Schema(_) => "SCHEMA_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Query(_) => "QUERY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for failures caused by the client's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Conflict(_) | Self::Validation(_)
        )
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error for an email that is already taken.
    #[must_use]
    pub fn email_taken(email: &str) -> Self {
        Self::conflict(format!("user with email '{}' already exists", email))
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query<T: Into<String>>(message: T) -> Self {
        Self::Query(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for HoctapError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // MySQL 1062 (ER_DUP_ENTRY): the unique index on `email` is the
            // final arbiter when two writers pass the probe concurrently.
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Serializable error detail for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `HoctapError`.
    #[must_use]
    pub fn from_error(error: &HoctapError) -> Self {
        Self {
            code: error.error_code().to_string(),
            details: None,
        }
    }

    /// Creates an error response with an arbitrary code.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&HoctapError> for ErrorResponse {
    fn from(error: &HoctapError) -> Self {
        Self::from_error(error)
    }
}
