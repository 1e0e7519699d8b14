use super::{check_average_price, check_quantity};
use crate::domain::portfolio::{Holding, PortfolioRepository, UpdateHolding};
use crate::shared::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHoldingRequest {
    #[schema(value_type = Option<String>, example = "12")]
    pub quantity: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "148.00")]
    pub average_price: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub purchase_date: Option<Date>,
}

pub struct UpdateHoldingUseCase {
    repo: Arc<dyn PortfolioRepository>,
}

impl UpdateHoldingUseCase {
    pub fn new(repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        id: Uuid,
        user_id: Uuid,
        req: UpdateHoldingRequest,
    ) -> Result<Holding, AppError> {
        if let Some(quantity) = req.quantity {
            check_quantity(quantity)?;
        }
        if let Some(price) = req.average_price {
            check_average_price(price)?;
        }

        let update = UpdateHolding {
            quantity: req.quantity,
            average_price: req.average_price,
            purchase_date: req.purchase_date,
        };

        self.repo
            .update(id, user_id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("Portfolio item not found".to_string()))
    }
}
