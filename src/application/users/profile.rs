use crate::domain::users::{RiskTolerance, User, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    pub risk_tolerance: Option<RiskTolerance>,
}

pub struct UpdateProfileUseCase {
    repo: Arc<dyn UserRepository>,
}

impl UpdateProfileUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// An empty request returns the profile unchanged.
    #[tracing::instrument(skip(self, user, req), fields(user_id = %user.id))]
    pub async fn execute(&self, user: User, req: UpdateProfileRequest) -> Result<User, AppError> {
        let Some(risk_tolerance) = req.risk_tolerance else {
            return Ok(user);
        };

        let updated = self
            .repo
            .update_risk_tolerance(user.id, risk_tolerance)
            .await?;

        tracing::info!("User profile updated");
        Ok(updated)
    }
}
