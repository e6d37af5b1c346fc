//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use hoctap_core::{ErrorResponse, HoctapError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Message used for server-side failures when the handler names none.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Returns the current time as an RFC 3339 string with second precision.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Envelope wrapping every JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: now_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a response with a message and no data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: None,
            timestamp: now_rfc3339(),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>, error: ErrorResponse) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: Some(error),
            timestamp: now_rfc3339(),
        }
    }
}

/// Application error type for Axum.
///
/// Client errors render their own message. Server errors render `fallback`
/// so storage details never reach the caller.
#[derive(Debug)]
pub struct AppError {
    pub error: HoctapError,
    fallback: &'static str,
}

impl AppError {
    /// Sets the message shown when the error is a server-side failure.
    #[must_use]
    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the HTTP status for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the message rendered in the response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        match &self.error {
            HoctapError::Validation(message) => message.clone(),
            err if err.is_client_error() => err.to_string(),
            _ => self.fallback.to_string(),
        }
    }
}

impl From<HoctapError> for AppError {
    fn from(error: HoctapError) -> Self {
        Self {
            error,
            fallback: INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.error.error_code(), "{}: {}", self.fallback, self.error);
        } else {
            warn!(code = self.error.error_code(), "Request rejected: {}", self.error);
        }

        let body = ApiResponse::error(self.public_message(), ErrorResponse::from_error(&self.error));
        (status, Json(body)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(message: &str, data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(message, data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(message, data)))
}

/// Helper to create a 200 response without data.
pub fn ok_message(message: &str) -> ApiResult<()> {
    Ok(Json(ApiResponse::message(message)))
}

/// Extension for attaching a fallback message to repository results.
pub trait ResultExt<T> {
    /// Converts the error into an [`AppError`] with the given fallback message.
    fn or_fail(self, fallback: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, HoctapError> {
    fn or_fail(self, fallback: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::from(e).with_fallback(fallback))
    }
}
