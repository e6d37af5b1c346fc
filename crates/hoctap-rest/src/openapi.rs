//! OpenAPI documentation configuration.
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable at `/swagger-ui`.
//! Every JSON body is wrapped in the `{message, data, error, timestamp}`
//! envelope; the schemas below describe the `data` member.

use crate::dto::{HealthData, UserRequest, UserStats, WelcomeData};
use hoctap_core::{ErrorResponse, FieldError, User, UserId};
use utoipa::OpenApi;

/// OpenAPI documentation for the HocTap API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HocTap API",
        version = "1.0.0",
        description = "CRUD API over users stored in MySQL",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::user_stats,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::welcome,
    ),
    components(
        schemas(
            UserId,
            User,
            UserRequest,
            UserStats,
            HealthData,
            WelcomeData,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/users/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/users/stats"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
