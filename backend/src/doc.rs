//! OpenAPI document for the REST adapter, served by Swagger UI in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::expenses::{ExpenseResponse, NewExpenseRequest};
use crate::inbound::http::users::{AuthResponse, CredentialsRequest};

/// Registers the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/v1/auth/register or /api/v1/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Finance backend API",
        description = "Account registration, login and per-user expenses."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::expenses::create_expense,
        crate::inbound::http::expenses::get_expense,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsRequest,
        AuthResponse,
        NewExpenseRequest,
        ExpenseResponse
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "expenses", description = "Per-user expense records"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
