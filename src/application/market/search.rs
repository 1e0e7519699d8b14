use crate::domain::market::{MarketDataProvider, SymbolMatch};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 50;
pub const MAX_QUERY_LEN: u64 = 100;

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free text: ticker or company name
    #[validate(length(max = MAX_QUERY_LEN, message = "Search query is too long"))]
    pub q: String,
    /// Maximum number of results (1 to 50, default 10)
    pub limit: Option<usize>,
}

pub struct SearchSymbolsUseCase {
    provider: Arc<dyn MarketDataProvider>,
}

impl SearchSymbolsUseCase {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Search never fails; provider errors are logged and yield no results.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: SearchQuery) -> Vec<SymbolMatch> {
        let q = query.q.trim();
        if q.is_empty() {
            return Vec::new();
        }
        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        match self.provider.search(q, limit).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Failed to search stocks for {:?}: {:?}", q, e);
                Vec::new()
            }
        }
    }
}
