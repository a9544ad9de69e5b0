use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::models;
use crate::routes;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::auth::login,
        routes::health::health,
        routes::articles::create_article,
        routes::articles::list_articles,
        routes::articles::get_article,
        routes::articles::search_articles,
        routes::articles::update_article,
        routes::articles::delete_article,
        routes::users::list_users,
        routes::users::get_user,
        routes::users::search_users,
        routes::users::update_user,
        routes::users::delete_user
    ),
    components(
        schemas(
            models::user::User,
            models::user::LoginRequest,
            models::user::LoginResponse,
            models::user::UserUpdateRequest,
            models::user::UserUpdateResponse,
            models::article::Article,
            models::article::ArticleCreateRequest,
            models::article::ArticleUpdateRequest,
            routes::MessageResponse,
            routes::health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    security(("bearerAuth" = [])),
    tags(
        (name = "Auth", description = "Login and token issuance"),
        (name = "Articles", description = "Article management"),
        (name = "Users", description = "User administration (Admin only)"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Swagger UI at /docs, backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
