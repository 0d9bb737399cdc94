//! Account endpoints.
//!
//! ```text
//! POST /api/v1/auth/register {"username":"alice","password":"correct horse"}
//! POST /api/v1/auth/login    {"username":"alice","password":"correct horse"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AuthResult, Error, LoginQuery, RegisterUserCommand};
use crate::inbound::UseCases;
use crate::inbound::http::ApiResult;

/// Credentials body shared by register and login.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Successful register or login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub username: String,
    /// Bearer token for protected routes.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            id: *result.user_id().as_uuid(),
            username: result.username().as_str().to_owned(),
            token: result.token().as_str().to_owned(),
            expires_at: result.token().expires_at(),
        }
    }
}

/// Create an account and return a token for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid username or password", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<UseCases>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let result = state
        .register
        .handle(RegisterUserCommand::new(username, password))
        .await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(result)))
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<UseCases>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let result = state
        .login
        .handle(LoginQuery::new(username, password))
        .await?;
    Ok(web::Json(result.into()))
}
