use crate::domain::market::{MarketDataRepository, MarketSnapshot};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresMarketDataRepository {
    pool: DbPool,
}

impl PostgresMarketDataRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketDataRepository for PostgresMarketDataRepository {
    #[tracing::instrument(skip(self, snapshot), fields(symbol = %snapshot.symbol))]
    async fn upsert(&self, snapshot: MarketSnapshot) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO market_data (symbol, price, volume, change_percent, last_updated, data_source)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (symbol) DO UPDATE SET
                price = EXCLUDED.price,
                volume = EXCLUDED.volume,
                change_percent = EXCLUDED.change_percent,
                last_updated = EXCLUDED.last_updated,
                data_source = EXCLUDED.data_source
            "#,
        )
        .bind(snapshot.symbol)
        .bind(snapshot.price)
        .bind(snapshot.volume)
        .bind(snapshot.change_percent)
        .bind(snapshot.last_updated)
        .bind(snapshot.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
