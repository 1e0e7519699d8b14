use crate::domain::users::{RiskTolerance, User};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row shape of the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct UserDbModel {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub risk_tolerance: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<UserDbModel> for User {
    type Error = anyhow::Error;

    fn try_from(model: UserDbModel) -> Result<Self, Self::Error> {
        let risk_tolerance: RiskTolerance = model.risk_tolerance.parse()?;

        Ok(Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            risk_tolerance,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
