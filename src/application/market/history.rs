use crate::application::portfolio::normalize_symbol;
use crate::domain::market::{HistoryInterval, HistoryPeriod, MarketDataProvider, PriceBar};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd or max (default 1y)
    pub period: Option<String>,
    /// 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo or 3mo (default 1d)
    pub interval: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    pub data: Vec<PriceBar>,
}

pub struct GetHistoryUseCase {
    provider: Arc<dyn MarketDataProvider>,
}

impl GetHistoryUseCase {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        symbol: &str,
        query: HistoryQuery,
    ) -> Result<PriceHistory, AppError> {
        let symbol = normalize_symbol(symbol)?;
        let period: HistoryPeriod = query
            .period
            .as_deref()
            .unwrap_or("1y")
            .parse()
            .map_err(|e| AppError::ValidationError(format!("period: {}", e)))?;
        let interval: HistoryInterval = query
            .interval
            .as_deref()
            .unwrap_or("1d")
            .parse()
            .map_err(|e| AppError::ValidationError(format!("interval: {}", e)))?;

        let data = self
            .provider
            .history(&symbol, period, interval)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get stock history for {}: {:?}", symbol, e);
                AppError::DependencyUnavailable(e)
            })?;

        if data.is_empty() {
            return Err(AppError::NotFound(format!(
                "No historical data found for symbol: {}",
                symbol
            )));
        }

        Ok(PriceHistory {
            symbol,
            period: period.to_string(),
            interval: interval.to_string(),
            data,
        })
    }
}
