use crate::domain::auth::{AuthError, TokenKind, TokenService};
use crate::domain::users::{User, UserRepository};
use std::sync::Arc;

/// Turns a presented bearer token into the user it belongs to.
///
/// Order matters: the token is verified before any lookup, and the active
/// flag is checked only once the identity is known.
pub struct ResolveIdentityUseCase {
    users: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
}

impl ResolveIdentityUseCase {
    pub fn new(users: Arc<dyn UserRepository>, token_service: Arc<dyn TokenService>) -> Self {
        Self {
            users,
            token_service,
        }
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn execute(&self, token: &str, expected: TokenKind) -> Result<User, AuthError> {
        let subject = self.token_service.verify_kind(token, expected)?;

        let user = self
            .users
            .find_by_email(&subject)
            .await
            .map_err(|e| {
                tracing::error!("Identity lookup failed: {:?}", e);
                AuthError::DependencyUnavailable(e)
            })?
            .ok_or(AuthError::UnknownIdentity)?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Inactive user presented a valid token");
            return Err(AuthError::IdentityInactive);
        }

        Ok(user)
    }
}
