use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP application. Swagger UI is only mounted in debug mode.
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let config = state.config.clone();

    let api = Router::new()
        .nest("/auth", routes::auth::routes())
        .nest("/users", routes::users::routes())
        .nest("/portfolio", routes::portfolio::routes())
        .nest("/market", routes::market::routes())
        .layer(rate_limit_layer(&config.rate_limit)?);

    let mut router = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api);

    if config.debug {
        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    Ok(router
        .layer(cors_layer(&config.cors_allowed_origins)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
