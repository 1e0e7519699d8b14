use crate::application::auth::resolve::ResolveIdentityUseCase;
use crate::domain::auth::TokenKind;
use crate::domain::users::User;
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Authenticated user extractor
///
/// Resolves the `Authorization: Bearer` access token to an active user.
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let user = ResolveIdentityUseCase::new(state.users.clone(), state.token_service.clone())
            .execute(token, TokenKind::Access)
            .await?;

        Ok(AuthUser { user })
    }
}

/// The credentials of a `Bearer` header; the scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
