//! Account handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::AccountResponse;
use crate::errors::AppResult;
use crate::services::LoginResponse;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
}

/// Account login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Create credential routes (registration and login)
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create account directory routes (listing and lookup)
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts))
        .route("/:id", get(get_account))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email address already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .account_service
        .register(payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .account_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(response))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Accounts",
    responses(
        (status = 200, description = "List of all accounts", body = Vec<AccountResponse>)
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.account_service.list_accounts().await?;
    Ok(Json(accounts))
}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.account_service.get_account(id).await?;
    Ok(Json(account))
}
