//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::HealthResponse;
use crate::handlers::user_handler::{AuthRequest, MessageResponse, UserPayload};
use domain::UserResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::authenticate,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            AuthRequest,
            UserPayload,
            MessageResponse,
            UserResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management and authentication endpoints"),
        (name = "Health", description = "Gateway liveness"),
    )
)]
pub struct ApiDoc;
