use crate::domain::portfolio::Holding;
use rust_decimal::Decimal;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Row shape of the `portfolios` table
#[derive(Debug, Clone, FromRow)]
pub struct HoldingDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub purchase_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<HoldingDbModel> for Holding {
    fn from(model: HoldingDbModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            symbol: model.symbol,
            quantity: model.quantity,
            average_price: model.average_price,
            purchase_date: model.purchase_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
