use crate::domain::auth::AuthError;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{NewUser, RiskTolerance, User, UserRepository};
use crate::shared::error::{AppError, is_unique_violation};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "securepassword123", min_length = 8)]
    pub password: String,
    #[serde(default)]
    pub risk_tolerance: Option<RiskTolerance>,
}

pub struct RegisterUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl RegisterUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: RegisterRequest) -> Result<User, AppError> {
        let existing = self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(AuthError::DependencyUnavailable)?;
        if existing.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.password_hasher.hash_password(&req.password).await?;

        let new_user = NewUser {
            email: req.email,
            password_hash,
            risk_tolerance: req.risk_tolerance.unwrap_or_default(),
        };

        // A concurrent registration can still win the race to the unique index
        let user = self.repo.create(new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::InternalServerError(e)
            }
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}
