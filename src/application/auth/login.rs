use crate::application::auth::token_utils::{TokenResponse, issue_token_pair};
use crate::domain::auth::{AuthError, TokenService};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "demo@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth2 password grant form; `username` carries the email.
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct PasswordGrantForm {
    #[validate(email(message = "Invalid email format"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<PasswordGrantForm> for LoginRequest {
    fn from(form: PasswordGrantForm) -> Self {
        Self {
            email: form.username,
            password: form.password,
        }
    }
}

pub type LoginResponse = TokenResponse;

pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordHashingService>,
}

impl LoginUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<dyn TokenService>,
        password_service: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            user_repo,
            token_service,
            password_service,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&req.email)
            .await
            .map_err(AuthError::DependencyUnavailable)?;

        // Unknown email and wrong password are indistinguishable to the caller,
        // in both message and argon2 work
        let Some(user) = user else {
            self.password_service
                .verify_password(&req.password, self.password_service.decoy_hash())
                .await;
            tracing::warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredential.into());
        };

        if !self
            .password_service
            .verify_password(&req.password, &user.password_hash)
            .await
        {
            tracing::warn!(user_id = %user.id, "Password verification failed");
            return Err(AuthError::InvalidCredential.into());
        }

        if !user.is_active {
            return Err(AuthError::IdentityInactive.into());
        }

        let tokens = issue_token_pair(self.token_service.as_ref(), &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(tokens)
    }
}
