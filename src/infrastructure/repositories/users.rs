use crate::domain::users::{NewUser, RiskTolerance, User, UserRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::users::UserDbModel;
use async_trait::async_trait;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, email, password_hash, risk_tolerance, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let row = sqlx::query_as::<_, UserDbModel>(&format!(
            r#"
            INSERT INTO users (email, password_hash, risk_tolerance)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.risk_tolerance.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let row = sqlx::query_as::<_, UserDbModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        let row = sqlx::query_as::<_, UserDbModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn update_risk_tolerance(
        &self,
        id: Uuid,
        risk_tolerance: RiskTolerance,
    ) -> Result<User, anyhow::Error> {
        let row = sqlx::query_as::<_, UserDbModel>(&format!(
            r#"
            UPDATE users
            SET risk_tolerance = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(risk_tolerance.as_str())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }
}
