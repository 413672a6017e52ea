//! Parking session REST API handlers

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{
    CheckInRequest, CheckOutReceiptDto, CheckOutRequest, ListParkingLogsParams, ParkingLogDto,
};
use crate::application::{CheckIn, CheckOut};
use crate::domain::{ParkingLogQuery, ParkingStatus};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{Access, TenantScope};
use crate::interfaces::http::state::AppState;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/parking/check-in",
    tag = "Parking",
    security(("bearer_auth" = [])),
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Session opened", body = ApiResponse<ParkingLogDto>),
        (status = 403, description = "Viewers cannot operate gates"),
        (status = 409, description = "Plate is already parked")
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CheckInRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ParkingLogDto>>), ApiError> {
    scope.require(Access::Operate)?;
    let local_time = request.date.zip(request.time);
    let log = state
        .parking
        .check_in(CheckIn {
            customer_id: scope.customer_id,
            plate_number: request.plate_number,
            gate: request.gate,
            local_time,
        })
        .await
        .map_err(domain_error)?;
    let dto = ParkingLogDto::new(log, &state.parking, Utc::now().timestamp());
    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

#[utoipa::path(
    post,
    path = "/api/v1/parking/{ticket_id}/check-out",
    tag = "Parking",
    security(("bearer_auth" = [])),
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Session closed and priced", body = ApiResponse<CheckOutReceiptDto>),
        (status = 404, description = "Unknown ticket"),
        (status = 409, description = "Ticket already closed"),
        (status = 422, description = "Checkout before check-in")
    )
)]
pub async fn check_out(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CheckOutRequest>,
) -> ApiResult<CheckOutReceiptDto> {
    scope.require(Access::Operate)?;
    let receipt = state
        .parking
        .check_out(CheckOut {
            customer_id: scope.customer_id,
            ticket_id,
            gate: request.gate,
            at: request.checkout_time,
        })
        .await
        .map_err(domain_error)?;
    ok(CheckOutReceiptDto::new(receipt, &state.parking))
}

#[utoipa::path(
    get,
    path = "/api/v1/parking/sessions",
    tag = "Parking",
    security(("bearer_auth" = [])),
    params(ListParkingLogsParams),
    responses(
        (status = 200, description = "Parking log, newest first", body = ApiResponse<PaginatedResponse<ParkingLogDto>>),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<ListParkingLogsParams>,
) -> ApiResult<PaginatedResponse<ParkingLogDto>> {
    let status = params
        .status
        .as_deref()
        .map(ParkingStatus::from_str)
        .transpose()
        .map_err(domain_error)?;
    let result = state
        .parking
        .list(ParkingLogQuery {
            customer_id: scope.customer_id,
            status,
            plate_number: params.plate_number,
            from_date: params.from_date,
            to_date: params.to_date,
            pagination: PaginationParams::new(params.page, params.limit),
        })
        .await
        .map_err(domain_error)?;
    let now = Utc::now().timestamp();
    ok(PaginatedResponse::from_result(result, |log| {
        ParkingLogDto::new(log, &state.parking, now)
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/parking/open",
    tag = "Parking",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicles currently parked", body = ApiResponse<Vec<ParkingLogDto>>)
    )
)]
pub async fn open_sessions(
    State(state): State<AppState>,
    scope: TenantScope,
) -> ApiResult<Vec<ParkingLogDto>> {
    let logs = state
        .parking
        .open_sessions(&scope.customer_id)
        .await
        .map_err(domain_error)?;
    let now = Utc::now().timestamp();
    ok(logs
        .into_iter()
        .map(|log| ParkingLogDto::new(log, &state.parking, now))
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/parking/{ticket_id}",
    tag = "Parking",
    security(("bearer_auth" = [])),
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Session details", body = ApiResponse<ParkingLogDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
) -> ApiResult<ParkingLogDto> {
    let log = state
        .parking
        .get(&scope.customer_id, ticket_id)
        .await
        .map_err(domain_error)?;
    ok(ParkingLogDto::new(log, &state.parking, Utc::now().timestamp()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/parking/{ticket_id}",
    tag = "Parking",
    security(("bearer_auth" = [])),
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
) -> ApiResult<()> {
    scope.require(Access::Manage)?;
    state
        .parking
        .delete(&scope.customer_id, ticket_id)
        .await
        .map_err(domain_error)?;
    ok(())
}
