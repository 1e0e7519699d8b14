use crate::application::portfolio::normalize_symbol;
use crate::domain::market::{MarketDataProvider, MarketDataRepository, MarketSnapshot, Quote};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Fetches a live quote and records it as the symbol's latest snapshot.
pub struct GetQuoteUseCase {
    provider: Arc<dyn MarketDataProvider>,
    snapshots: Arc<dyn MarketDataRepository>,
}

impl GetQuoteUseCase {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        snapshots: Arc<dyn MarketDataRepository>,
    ) -> Self {
        Self {
            provider,
            snapshots,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, symbol: &str) -> Result<Quote, AppError> {
        let symbol = normalize_symbol(symbol)?;

        let quote = self
            .provider
            .quote(&symbol)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get stock quote for {}: {:?}", symbol, e);
                AppError::DependencyUnavailable(e)
            })?
            .ok_or_else(|| {
                AppError::NotFound(format!("Stock data not found for symbol: {}", symbol))
            })?;

        // Snapshot write failures never fail the read
        match MarketSnapshot::from_quote(&quote, self.provider.source_name()) {
            Ok(snapshot) => {
                if let Err(e) = self.snapshots.upsert(snapshot).await {
                    tracing::warn!("Failed to store market snapshot for {}: {:?}", symbol, e);
                }
            }
            Err(e) => tracing::warn!("Quote for {} not storable: {}", symbol, e),
        }

        Ok(quote)
    }
}
