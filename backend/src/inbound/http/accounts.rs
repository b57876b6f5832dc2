//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /api/auth/login {"email":"ada@example.com","password":"pw"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthSession, CredentialsValidationError, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_error;

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialsValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
    }
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

/// Signed-in account returned by register and login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Human-readable outcome.
    #[schema(example = "Login successful")]
    pub message: String,
    /// Bearer token valid for one hour.
    pub token: String,
    /// Identifier of the signed-in user.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    /// Name given at registration.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl AuthResponse {
    fn new(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_owned(),
            token: session.token.as_str().to_owned(),
            user_id: session.user_id.to_string(),
            name: session.name.as_ref().to_owned(),
        }
    }
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Credential store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::new("User registered successfully", session)))
}

/// Check credentials and return a fresh bearer token.
///
/// Unknown emails and wrong passwords are indistinguishable.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(AuthResponse::new("Login successful", session)))
}
