//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::account_handler;
use crate::domain::AccountResponse;
use crate::services::LoginResponse;

/// OpenAPI documentation for the account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service",
        version = "0.1.0",
        description = "User account service: registration, password login and account lookup",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        account_handler::register,
        account_handler::login,
        account_handler::list_accounts,
        account_handler::get_account,
    ),
    components(
        schemas(
            AccountResponse,
            LoginResponse,
            account_handler::RegisterRequest,
            account_handler::LoginRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Account registration, login and lookup")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /users/login"))
                        .build(),
                ),
            );
        }
    }
}
