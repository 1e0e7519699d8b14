use crate::infrastructure::state::AppState;
use crate::presentation::handlers::market;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quote/{symbol}", get(market::get_quote))
        .route("/index", get(market::get_indices))
        .route("/search", get(market::search_symbols))
        .route("/history/{symbol}", get(market::get_history))
}
