use crate::application::portfolio::create::{CreateHoldingRequest, CreateHoldingUseCase};
use crate::application::portfolio::delete::DeleteHoldingUseCase;
use crate::application::portfolio::list::ListHoldingsUseCase;
use crate::application::portfolio::update::{UpdateHoldingRequest, UpdateHoldingUseCase};
use crate::domain::portfolio::Holding;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldingResource {
    pub symbol: String,
    #[schema(value_type = String)]
    pub quantity: Decimal,
    #[schema(value_type = String)]
    pub average_price: Decimal,
    #[schema(value_type = Option<String>, format = Date)]
    pub purchase_date: Option<time::Date>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Holding> for HoldingResource {
    fn from(holding: Holding) -> Self {
        Self {
            symbol: holding.symbol,
            quantity: holding.quantity,
            average_price: holding.average_price,
            purchase_date: holding.purchase_date,
            created_at: holding.created_at,
            updated_at: holding.updated_at,
        }
    }
}

fn holding_resource(holding: Holding) -> JsonApiResource<HoldingResource> {
    JsonApiResource::new(
        "holdings",
        holding.id.to_string(),
        HoldingResource::from(holding),
    )
}

/// List the current user's holdings
#[utoipa::path(
    get,
    path = "/api/v1/portfolio",
    responses(
        (status = 200, description = "Holdings", body = JsonApiResponse<Vec<JsonApiResource<HoldingResource>>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "portfolio",
    security(("bearer_auth" = []))
)]
pub async fn list_holdings(
    State(state): State<AppState>,
    AuthUser { user }: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let holdings = ListHoldingsUseCase::new(state.portfolio)
        .execute(user.id)
        .await?;

    let total = holdings.len() as i64;
    let resources: Vec<_> = holdings.into_iter().map(holding_resource).collect();

    Ok(Json(
        JsonApiResponse::new(resources).with_meta(JsonApiMeta::new().with_total(total)),
    ))
}

/// Add a holding
#[utoipa::path(
    post,
    path = "/api/v1/portfolio",
    request_body = CreateHoldingRequest,
    responses(
        (status = 201, description = "Holding added", body = JsonApiResponse<JsonApiResource<HoldingResource>>),
        (status = 409, description = "Symbol already in portfolio", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "portfolio",
    security(("bearer_auth" = []))
)]
pub async fn create_holding(
    State(state): State<AppState>,
    AuthUser { user }: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateHoldingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let holding = CreateHoldingUseCase::new(state.portfolio)
        .execute(user.id, req)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JsonApiResponse::new(holding_resource(holding))),
    ))
}

/// Update one of the current user's holdings
#[utoipa::path(
    put,
    path = "/api/v1/portfolio/{id}",
    params(("id" = Uuid, Path, description = "Holding ID")),
    request_body = UpdateHoldingRequest,
    responses(
        (status = 200, description = "Holding updated", body = JsonApiResponse<JsonApiResource<HoldingResource>>),
        (status = 404, description = "Holding not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "portfolio",
    security(("bearer_auth" = []))
)]
pub async fn update_holding(
    State(state): State<AppState>,
    AuthUser { user }: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateHoldingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let holding = UpdateHoldingUseCase::new(state.portfolio)
        .execute(id, user.id, req)
        .await?;

    Ok(Json(JsonApiResponse::new(holding_resource(holding))))
}

/// Remove one of the current user's holdings
#[utoipa::path(
    delete,
    path = "/api/v1/portfolio/{id}",
    params(("id" = Uuid, Path, description = "Holding ID")),
    responses(
        (status = 204, description = "Holding removed"),
        (status = 404, description = "Holding not found", body = ErrorResponse)
    ),
    tag = "portfolio",
    security(("bearer_auth" = []))
)]
pub async fn delete_holding(
    State(state): State<AppState>,
    AuthUser { user }: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    DeleteHoldingUseCase::new(state.portfolio)
        .execute(id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
