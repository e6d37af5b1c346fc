//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes JSON and validates it using the
//! `validator` crate. Both malformed bodies and rule violations are
//! answered with 400 Bad Request in the standard envelope.
//!
//! The body is decoded as JSON whatever its `Content-Type`, so clients that
//! omit the header are still served.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        FromRequest, Request,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hoctap_core::{ErrorResponse, FieldError};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::{Validate, ValidationErrors};

/// Message returned for bodies that are not valid JSON for the target type.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// Message returned when the body cannot be read at all.
pub const BODY_ERROR_MESSAGE: &str = "Failed to read request body";

/// JSON extractor that automatically validates the deserialized value.
///
/// ```ignore
/// async fn create_user(ValidatedJson(request): ValidatedJson<UserRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// The body could not be read.
    BodyError(BytesRejection),
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BodyError(rejection) => {
                warn!("Could not read request body: {}", rejection);
                (
                    rejection.status(),
                    ApiResponse::error(BODY_ERROR_MESSAGE, ErrorResponse::with_code("INVALID_BODY")),
                )
            }
            Self::JsonError(rejection) => {
                warn!("Rejected request body: {}", rejection);
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::error(INVALID_JSON_MESSAGE, ErrorResponse::with_code("INVALID_JSON")),
                )
            }
            Self::ValidationError(errors) => {
                let field_errors = convert_validation_errors(&errors);
                let message = field_errors
                    .first()
                    .map_or_else(|| "Request validation failed".to_string(), |e| e.message.clone());
                warn!("Request validation failed: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::error(
                        message,
                        ErrorResponse::with_code("VALIDATION_ERROR").with_details(field_errors),
                    ),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Converts validator errors to field errors, ordered by field name.
fn convert_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map_or_else(|| format!("Validation failed for field '{}'", field), ToString::to_string),
                code: err.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::BodyError)?;
        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
