use crate::application::market::history::{GetHistoryUseCase, HistoryQuery, PriceHistory};
use crate::application::market::indices::{GetIndicesUseCase, MarketIndex};
use crate::application::market::quote::GetQuoteUseCase;
use crate::application::market::search::{SearchQuery, SearchSymbolsUseCase};
use crate::domain::market::{Quote, SymbolMatch};
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedQuery;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

/// Latest quote for a symbol
#[utoipa::path(
    get,
    path = "/api/v1/market/quote/{symbol}",
    params(("symbol" = String, Path, description = "Ticker symbol", example = "AAPL")),
    responses(
        (status = 200, description = "Quote", body = JsonApiResponse<JsonApiResource<Quote>>),
        (status = 404, description = "Unknown symbol", body = ErrorResponse),
        (status = 503, description = "Market data provider unavailable", body = ErrorResponse)
    ),
    tag = "market",
    security(("bearer_auth" = []))
)]
pub async fn get_quote(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quote = GetQuoteUseCase::new(state.market_provider, state.market_data)
        .execute(&symbol)
        .await?;

    let id = quote.symbol.clone();
    Ok(Json(JsonApiResponse::new(JsonApiResource::new(
        "quotes", id, quote,
    ))))
}

/// Major market indices
#[utoipa::path(
    get,
    path = "/api/v1/market/index",
    responses(
        (status = 200, description = "Indices that could be fetched", body = JsonApiResponse<Vec<JsonApiResource<MarketIndex>>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "market",
    security(("bearer_auth" = []))
)]
pub async fn get_indices(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let indices = GetIndicesUseCase::new(state.market_provider).execute().await;

    let resources: Vec<_> = indices
        .into_iter()
        .map(|index| JsonApiResource::new("market-indices", index.symbol.clone(), index))
        .collect();
    let total = resources.len() as i64;

    Json(JsonApiResponse::new(resources).with_meta(JsonApiMeta::new().with_total(total)))
}

/// Search for symbols
#[utoipa::path(
    get,
    path = "/api/v1/market/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matches, empty when the provider fails", body = JsonApiResponse<Vec<JsonApiResource<SymbolMatch>>>),
        (status = 422, description = "Query too long", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "market",
    security(("bearer_auth" = []))
)]
pub async fn search_symbols(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> impl IntoResponse {
    let matches = SearchSymbolsUseCase::new(state.market_provider)
        .execute(query)
        .await;

    let resources: Vec<_> = matches
        .into_iter()
        .map(|m| JsonApiResource::new("symbols", m.symbol.clone(), m))
        .collect();
    let total = resources.len() as i64;

    Json(JsonApiResponse::new(resources).with_meta(JsonApiMeta::new().with_total(total)))
}

/// Price history for a symbol
#[utoipa::path(
    get,
    path = "/api/v1/market/history/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker symbol", example = "AAPL"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "OHLCV bars", body = JsonApiResponse<JsonApiResource<PriceHistory>>),
        (status = 404, description = "No data for symbol", body = ErrorResponse),
        (status = 422, description = "Invalid period or interval", body = ErrorResponse)
    ),
    tag = "market",
    security(("bearer_auth" = []))
)]
pub async fn get_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let history = GetHistoryUseCase::new(state.market_provider)
        .execute(&symbol, query)
        .await?;

    let id = history.symbol.clone();
    Ok(Json(JsonApiResponse::new(JsonApiResource::new(
        "price-histories",
        id,
        history,
    ))))
}
