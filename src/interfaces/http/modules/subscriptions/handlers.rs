//! Subscription REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{
    ActiveSubscriptionParams, CreateSubscriptionRequest, ListSubscriptionsParams, SubscriptionDto,
    UpdateSubscriptionRequest,
};
use crate::domain::{CreateSubscriptionDto, SubscriptionQuery};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{Access, TenantScope};
use crate::interfaces::http::state::AppState;
use crate::shared::PaginationParams;

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(ListSubscriptionsParams),
    responses(
        (status = 200, description = "Passes, latest ending first", body = ApiResponse<PaginatedResponse<SubscriptionDto>>)
    )
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<ListSubscriptionsParams>,
) -> ApiResult<PaginatedResponse<SubscriptionDto>> {
    let result = state
        .subscriptions
        .list(SubscriptionQuery {
            customer_id: scope.customer_id,
            plate_number: params.plate_number,
            active_on: params.active_on,
            pagination: PaginationParams::new(params.page, params.limit),
        })
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(result, SubscriptionDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/{subscription_id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("subscription_id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Pass details", body = ApiResponse<SubscriptionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_subscription(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(subscription_id): Path<i32>,
) -> ApiResult<SubscriptionDto> {
    let subscription = state
        .subscriptions
        .get(&scope.customer_id, subscription_id)
        .await
        .map_err(domain_error)?;
    ok(subscription.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Pass added", body = ApiResponse<SubscriptionDto>),
        (status = 422, description = "End date before start date")
    )
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionDto>>), ApiError> {
    scope.require(Access::Manage)?;
    let subscription = state
        .subscriptions
        .add_subscription(CreateSubscriptionDto {
            customer_id: scope.customer_id,
            plate_number: request.plate_number,
            name: request.name,
            phone_number: request.phone_number,
            office: request.office,
            parking_lot: request.parking_lot,
            subscription_type: request.subscription_type,
            amount: request.amount,
            start_date: request.start_date,
            end_date: request.end_date,
        })
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(subscription.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/subscriptions/{subscription_id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("subscription_id" = i32, Path, description = "Subscription ID")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Pass updated", body = ApiResponse<SubscriptionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(subscription_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateSubscriptionRequest>,
) -> ApiResult<SubscriptionDto> {
    scope.require(Access::Manage)?;
    let subscription = state
        .subscriptions
        .update(&scope.customer_id, subscription_id, request.into())
        .await
        .map_err(domain_error)?;
    ok(subscription.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{subscription_id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("subscription_id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Pass deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(subscription_id): Path<i32>,
) -> ApiResult<()> {
    scope.require(Access::Manage)?;
    state
        .subscriptions
        .delete(&scope.customer_id, subscription_id)
        .await
        .map_err(domain_error)?;
    ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/active",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(ActiveSubscriptionParams),
    responses(
        (status = 200, description = "Pass covering the day; data is null when none", body = ApiResponse<SubscriptionDto>)
    )
)]
pub async fn find_active(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<ActiveSubscriptionParams>,
) -> ApiResult<Option<SubscriptionDto>> {
    let day = params.date.unwrap_or_else(|| {
        Utc::now()
            .with_timezone(&state.parking.settings().utc_offset)
            .date_naive()
    });
    let subscription = state
        .subscriptions
        .find_active(&scope.customer_id, &params.plate_number, day)
        .await
        .map_err(domain_error)?;
    ok(subscription.map(Into::into))
}
