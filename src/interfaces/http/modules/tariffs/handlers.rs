//! Tariff REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    CreateTariffRequest, MatchParams, QuoteParams, TariffDto, TariffOverlapDto, TariffQuoteDto,
    UpdateTariffRequest,
};
use crate::domain::{CreateTariffDto, UpdateTariffDto};
use crate::interfaces::http::common::{
    domain_error, ok, validate_query, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::{Access, TenantScope};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buckets ordered by from_minutes", body = ApiResponse<Vec<TariffDto>>)
    )
)]
pub async fn list_tariffs(
    State(state): State<AppState>,
    scope: TenantScope,
) -> ApiResult<Vec<TariffDto>> {
    let tariffs = state
        .tariffs
        .list(&scope.customer_id)
        .await
        .map_err(domain_error)?;
    ok(tariffs.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/{tariff_id}",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(("tariff_id" = Uuid, Path, description = "Tariff ID")),
    responses(
        (status = 200, description = "Tariff details", body = ApiResponse<TariffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_tariff(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(tariff_id): Path<Uuid>,
) -> ApiResult<TariffDto> {
    let tariff = state
        .tariffs
        .get(&scope.customer_id, tariff_id)
        .await
        .map_err(domain_error)?;
    ok(tariff.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    request_body = CreateTariffRequest,
    responses(
        (status = 201, description = "Bucket added", body = ApiResponse<TariffDto>),
        (status = 422, description = "Empty or negative range")
    )
)]
pub async fn create_tariff(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateTariffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TariffDto>>), ApiError> {
    scope.require(Access::Administer)?;
    let tariff = state
        .tariffs
        .add_tariff(CreateTariffDto {
            customer_id: scope.customer_id,
            from_minutes: request.from_minutes,
            to_minutes: request.to_minutes,
            cost: request.cost,
            initiated_by: Some(scope.user.email),
        })
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tariff.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/tariffs/{tariff_id}",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(("tariff_id" = Uuid, Path, description = "Tariff ID")),
    request_body = UpdateTariffRequest,
    responses(
        (status = 200, description = "Bucket updated", body = ApiResponse<TariffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_tariff(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(tariff_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTariffRequest>,
) -> ApiResult<TariffDto> {
    scope.require(Access::Administer)?;
    let tariff = state
        .tariffs
        .update(
            &scope.customer_id,
            tariff_id,
            UpdateTariffDto {
                from_minutes: request.from_minutes,
                to_minutes: request.to_minutes,
                cost: request.cost,
                updated_by: Some(scope.user.email.clone()),
            },
        )
        .await
        .map_err(domain_error)?;
    ok(tariff.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/tariffs/{tariff_id}",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(("tariff_id" = Uuid, Path, description = "Tariff ID")),
    responses(
        (status = 200, description = "Bucket removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_tariff(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(tariff_id): Path<Uuid>,
) -> ApiResult<()> {
    scope.require(Access::Administer)?;
    state
        .tariffs
        .remove_tariff(&scope.customer_id, tariff_id)
        .await
        .map_err(domain_error)?;
    ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/match",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(MatchParams),
    responses(
        (status = 200, description = "Buckets covering the duration", body = ApiResponse<Vec<TariffDto>>)
    )
)]
pub async fn match_tariffs(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<MatchParams>,
) -> ApiResult<Vec<TariffDto>> {
    validate_query(&params)?;
    let tariffs = state
        .tariffs
        .match_tariff(&scope.customer_id, params.minutes)
        .await
        .map_err(domain_error)?;
    ok(tariffs.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/quote",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(QuoteParams),
    responses(
        (status = 200, description = "Price of a stay", body = ApiResponse<TariffQuoteDto>),
        (status = 422, description = "Duration out of range")
    )
)]
pub async fn quote(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<QuoteParams>,
) -> ApiResult<TariffQuoteDto> {
    validate_query(&params)?;
    let quote = state
        .tariffs
        .quote(&scope.customer_id, params.duration_seconds)
        .await
        .map_err(domain_error)?;
    ok(TariffQuoteDto::new(quote, &state.parking.settings().currency))
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/overlaps",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pairs of intersecting buckets", body = ApiResponse<Vec<TariffOverlapDto>>)
    )
)]
pub async fn list_overlaps(
    State(state): State<AppState>,
    scope: TenantScope,
) -> ApiResult<Vec<TariffOverlapDto>> {
    let pairs = state
        .tariffs
        .overlaps(&scope.customer_id)
        .await
        .map_err(domain_error)?;
    ok(pairs
        .into_iter()
        .map(|(first, second)| TariffOverlapDto { first, second })
        .collect())
}
