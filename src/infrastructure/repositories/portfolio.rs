use crate::domain::portfolio::{Holding, NewHolding, PortfolioRepository, UpdateHolding};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::portfolio::HoldingDbModel;
use async_trait::async_trait;
use uuid::Uuid;

const HOLDING_COLUMNS: &str =
    "id, user_id, symbol, quantity, average_price, purchase_date, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresPortfolioRepository {
    pool: DbPool,
}

impl PostgresPortfolioRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for PostgresPortfolioRepository {
    #[tracing::instrument(skip(self))]
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Holding>, anyhow::Error> {
        let rows = sqlx::query_as::<_, HoldingDbModel>(&format!(
            r#"
            SELECT {HOLDING_COLUMNS}
            FROM portfolios
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Holding>, anyhow::Error> {
        let row = sqlx::query_as::<_, HoldingDbModel>(&format!(
            "SELECT {HOLDING_COLUMNS} FROM portfolios WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Holding::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_symbol(
        &self,
        user_id: Uuid,
        symbol: &str,
    ) -> Result<Option<Holding>, anyhow::Error> {
        let row = sqlx::query_as::<_, HoldingDbModel>(&format!(
            "SELECT {HOLDING_COLUMNS} FROM portfolios WHERE user_id = $1 AND symbol = $2"
        ))
        .bind(user_id)
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Holding::from))
    }

    #[tracing::instrument(skip(self, holding), fields(symbol = %holding.symbol))]
    async fn create(&self, holding: NewHolding) -> Result<Holding, anyhow::Error> {
        let row = sqlx::query_as::<_, HoldingDbModel>(&format!(
            r#"
            INSERT INTO portfolios (user_id, symbol, quantity, average_price, purchase_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {HOLDING_COLUMNS}
            "#
        ))
        .bind(holding.user_id)
        .bind(holding.symbol)
        .bind(holding.quantity)
        .bind(holding.average_price)
        .bind(holding.purchase_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: UpdateHolding,
    ) -> Result<Option<Holding>, anyhow::Error> {
        let mut builder =
            sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE portfolios SET updated_at = NOW()");

        if let Some(quantity) = update.quantity {
            builder.push(", quantity = ").push_bind(quantity);
        }
        if let Some(average_price) = update.average_price {
            builder.push(", average_price = ").push_bind(average_price);
        }
        if let Some(purchase_date) = update.purchase_date {
            builder.push(", purchase_date = ").push_bind(purchase_date);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND user_id = ")
            .push_bind(user_id)
            .push(format!(" RETURNING {HOLDING_COLUMNS}"));

        let row = builder
            .build_query_as::<HoldingDbModel>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Holding::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
