use crate::application::auth::login::{LoginRequest, PasswordGrantForm};
use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::register::RegisterRequest;
use crate::application::auth::token_utils::TokenResponse;
use crate::application::market::history::PriceHistory;
use crate::application::market::indices::MarketIndex;
use crate::application::portfolio::create::CreateHoldingRequest;
use crate::application::portfolio::update::UpdateHoldingRequest;
use crate::application::users::profile::UpdateProfileRequest;
use crate::domain::market::{PriceBar, Quote, SymbolMatch};
use crate::domain::users::RiskTolerance;
use crate::presentation::handlers::auth::AuthTokenResource;
use crate::presentation::handlers::portfolio::HoldingResource;
use crate::presentation::handlers::users::UserResource;
use crate::shared::error::{ErrorResponse, JsonApiError, JsonApiErrorSource};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investa API",
        version = "0.1.0",
        description = "Personal investment tracking backend\n\nResponses follow the JSON:API v1.1 document structure."
    ),
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::token,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::users::get_profile,
        crate::presentation::handlers::users::update_profile,
        crate::presentation::handlers::portfolio::list_holdings,
        crate::presentation::handlers::portfolio::create_holding,
        crate::presentation::handlers::portfolio::update_holding,
        crate::presentation::handlers::portfolio::delete_holding,
        crate::presentation::handlers::market::get_quote,
        crate::presentation::handlers::market::get_indices,
        crate::presentation::handlers::market::search_symbols,
        crate::presentation::handlers::market::get_history,
    ),
    components(
        schemas(
            // Request DTOs
            RegisterRequest,
            LoginRequest,
            PasswordGrantForm,
            RefreshTokenRequest,
            UpdateProfileRequest,
            CreateHoldingRequest,
            UpdateHoldingRequest,
            TokenResponse,
            RiskTolerance,

            // JSON:API Resource types
            UserResource,
            HoldingResource,
            AuthTokenResource,
            Quote,
            MarketIndex,
            SymbolMatch,
            PriceBar,
            PriceHistory,
            JsonApiResource<UserResource>,
            JsonApiResource<HoldingResource>,
            JsonApiResource<AuthTokenResource>,

            // JSON:API Response types
            JsonApiResponse<JsonApiResource<UserResource>>,
            JsonApiResponse<JsonApiResource<HoldingResource>>,
            JsonApiResponse<Vec<JsonApiResource<HoldingResource>>>,
            JsonApiResponse<JsonApiResource<AuthTokenResource>>,
            JsonApiMeta,

            // JSON:API Error types
            ErrorResponse,
            JsonApiError,
            JsonApiErrorSource,
        )
    ),
    tags(
        (name = "auth", description = "Registration and token endpoints"),
        (name = "users", description = "Profile of the authenticated user"),
        (name = "portfolio", description = "Holdings of the authenticated user"),
        (name = "market", description = "Market data passthrough")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
