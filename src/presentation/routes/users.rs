use crate::infrastructure::state::AppState;
use crate::presentation::handlers::users;
use axum::{Router, routing::get};

/// User routes - the authenticated user's own profile
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(users::get_profile).put(users::update_profile),
    )
}
