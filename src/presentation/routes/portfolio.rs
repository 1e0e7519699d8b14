use crate::infrastructure::state::AppState;
use crate::presentation::handlers::portfolio;
use axum::{
    Router,
    routing::{get, put},
};

/// Portfolio routes - holdings scoped to the authenticated user
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(portfolio::list_holdings).post(portfolio::create_holding),
        )
        .route(
            "/{id}",
            put(portfolio::update_holding).delete(portfolio::delete_holding),
        )
}
