use crate::application::auth::resolve::ResolveIdentityUseCase;
use crate::application::auth::token_utils::{TokenResponse, issue_token_pair};
use crate::domain::auth::{TokenKind, TokenService};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

pub type RefreshTokenResponse = TokenResponse;

/// Exchanges a valid refresh token for a new token pair.
///
/// Refresh tokens are stateless; the old one stays valid until it expires.
pub struct RefreshTokenUseCase {
    resolver: ResolveIdentityUseCase,
    token_service: Arc<dyn TokenService>,
}

impl RefreshTokenUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, token_service: Arc<dyn TokenService>) -> Self {
        Self {
            resolver: ResolveIdentityUseCase::new(user_repo, token_service.clone()),
            token_service,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        req: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        let user = self
            .resolver
            .execute(&req.refresh_token, TokenKind::Refresh)
            .await?;

        issue_token_pair(self.token_service.as_ref(), &user.email)
    }
}
