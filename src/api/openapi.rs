//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{User, UserFields};

/// OpenAPI documentation for the user CRUD service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User CRUD",
        version = "0.1.0",
        description = "Create, list, read, update and delete users backed by a SQL store"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(User, UserFields)
    ),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
