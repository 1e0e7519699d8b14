use crate::domain::auth::TokenService;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};

/// Common response structure for token operations
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Issue a fresh access/refresh pair for `subject`
pub fn issue_token_pair(
    token_service: &dyn TokenService,
    subject: &str,
) -> Result<TokenResponse, AppError> {
    let access_token = token_service.issue_access(subject).map_err(|e| {
        tracing::error!("Failed to issue access token: {}", e);
        AppError::InternalServerError(e.into())
    })?;
    let refresh_token = token_service.issue_refresh(subject).map_err(|e| {
        tracing::error!("Failed to issue refresh token: {}", e);
        AppError::InternalServerError(e.into())
    })?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.access_ttl().whole_seconds(),
    })
}
