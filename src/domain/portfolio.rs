use async_trait::async_trait;
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// A single position in a user's portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub purchase_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewHolding {
    pub user_id: Uuid,
    pub symbol: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub purchase_date: Option<Date>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateHolding {
    pub quantity: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub purchase_date: Option<Date>,
}

/// Repository for portfolio holdings. Every lookup is scoped to the owner.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Holding>, anyhow::Error>;
    async fn find_for_user(&self, id: Uuid, user_id: Uuid)
    -> Result<Option<Holding>, anyhow::Error>;
    async fn find_by_symbol(
        &self,
        user_id: Uuid,
        symbol: &str,
    ) -> Result<Option<Holding>, anyhow::Error>;
    async fn create(&self, holding: NewHolding) -> Result<Holding, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: UpdateHolding,
    ) -> Result<Option<Holding>, anyhow::Error>;
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error>;
}
