use crate::application::auth::login::{LoginRequest, LoginUseCase, PasswordGrantForm};
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::application::auth::token_utils::TokenResponse;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers::users::UserResource;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::{ValidatedForm, ValidatedJson};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResource {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenResponse> for AuthTokenResource {
    fn from(tokens: TokenResponse) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        }
    }
}

fn token_document(
    tokens: TokenResponse,
) -> Json<JsonApiResponse<JsonApiResource<AuthTokenResource>>> {
    Json(JsonApiResponse::new(JsonApiResource::new(
        "auth-tokens",
        "session",
        AuthTokenResource::from(tokens),
    )))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RegisterUseCase::new(state.users, state.password_service);

    let user = use_case.execute(req).await?;
    let resource = JsonApiResource::new("users", user.id.to_string(), UserResource::from(user));

    Ok((StatusCode::CREATED, Json(JsonApiResponse::new(resource))))
}

/// Login handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Inactive user", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = LoginUseCase::new(state.users, state.token_service, state.password_service);

    let tokens = use_case.execute(req).await?;

    Ok((StatusCode::OK, token_document(tokens)))
}

/// OAuth2 password grant, answering with a bare token object
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    request_body(content = PasswordGrantForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn token(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<PasswordGrantForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let use_case = LoginUseCase::new(state.users, state.token_service, state.password_service);

    Ok(Json(use_case.execute(form.into()).await?))
}

/// Refresh token handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Invalid refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RefreshTokenUseCase::new(state.users, state.token_service);

    let tokens = use_case.execute(req).await?;

    Ok((StatusCode::OK, token_document(tokens)))
}
