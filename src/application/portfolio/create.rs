use super::{check_average_price, check_quantity, normalize_symbol};
use crate::domain::portfolio::{Holding, NewHolding, PortfolioRepository};
use crate::shared::error::{AppError, is_unique_violation};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHoldingRequest {
    #[validate(length(
        min = 1,
        max = 20,
        message = "Symbol must be between 1 and 20 characters"
    ))]
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(value_type = String, example = "10")]
    pub quantity: Decimal,
    #[schema(value_type = String, example = "150.25")]
    pub average_price: Decimal,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-15")]
    pub purchase_date: Option<Date>,
}

pub struct CreateHoldingUseCase {
    repo: Arc<dyn PortfolioRepository>,
}

impl CreateHoldingUseCase {
    pub fn new(repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req), fields(symbol = %req.symbol))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        req: CreateHoldingRequest,
    ) -> Result<Holding, AppError> {
        let symbol = normalize_symbol(&req.symbol)?;
        check_quantity(req.quantity)?;
        check_average_price(req.average_price)?;

        let conflict =
            || AppError::Conflict(format!("Symbol {} already exists in portfolio", symbol));

        if self.repo.find_by_symbol(user_id, &symbol).await?.is_some() {
            return Err(conflict());
        }

        let holding = self
            .repo
            .create(NewHolding {
                user_id,
                symbol: symbol.clone(),
                quantity: req.quantity,
                average_price: req.average_price,
                purchase_date: req.purchase_date,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    conflict()
                } else {
                    AppError::InternalServerError(e)
                }
            })?;

        tracing::info!(holding_id = %holding.id, "Portfolio item added");
        Ok(holding)
    }
}
