use crate::application::users::profile::{UpdateProfileRequest, UpdateProfileUseCase};
use crate::domain::users::{RiskTolerance, User};
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    pub email: String,
    pub risk_tolerance: RiskTolerance,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            risk_tolerance: user.risk_tolerance,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn user_document(user: User) -> Json<JsonApiResponse<JsonApiResource<UserResource>>> {
    Json(JsonApiResponse::new(JsonApiResource::new(
        "users",
        user.id.to_string(),
        UserResource::from(user),
    )))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Inactive user", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(AuthUser { user }: AuthUser) -> impl IntoResponse {
    user_document(user)
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser { user }: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = UpdateProfileUseCase::new(state.users);

    let user = use_case.execute(user, req).await?;

    Ok(user_document(user))
}
