use crate::domain::market::MarketDataProvider;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Tracked indices and FX pairs, in display order
pub const MARKET_INDICES: [(&str, &str); 5] = [
    ("^N225", "Nikkei 225"),
    ("^GSPC", "S&P 500"),
    ("^IXIC", "NASDAQ Composite"),
    ("^DJI", "Dow Jones Industrial Average"),
    ("USDJPY=X", "USD/JPY"),
];

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: i64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_updated: OffsetDateTime,
}

pub struct GetIndicesUseCase {
    provider: Arc<dyn MarketDataProvider>,
}

impl GetIndicesUseCase {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Indices the provider cannot serve are left out rather than failing the list.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Vec<MarketIndex> {
        let lookups = MARKET_INDICES.iter().map(|&(symbol, name)| async move {
            match self.provider.quote(symbol).await {
                Ok(Some(quote)) => Some(MarketIndex {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    current_price: quote.current_price,
                    change: quote.change,
                    change_percent: quote.change_percent,
                    volume: quote.volume,
                    last_updated: quote.last_updated,
                }),
                Ok(None) => {
                    tracing::warn!("No index data for {}", symbol);
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to get index data for {}: {:?}", symbol, e);
                    None
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }
}
