//! Report handlers

use axum::extract::{Query, State};

use super::dto::{OccupancyDto, RevenueParams, RevenueReportDto};
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::{Access, TenantScope};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(RevenueParams),
    responses(
        (status = 200, description = "Takings over closed sessions", body = ApiResponse<RevenueReportDto>),
        (status = 403, description = "Admins and managers only"),
        (status = 422, description = "from is after to")
    )
)]
pub async fn revenue(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<RevenueParams>,
) -> ApiResult<RevenueReportDto> {
    scope.require(Access::Manage)?;
    let report = state
        .reports
        .revenue(&scope.customer_id, params.from, params.to)
        .await
        .map_err(domain_error)?;
    ok(report.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/occupancy",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicles currently parked", body = ApiResponse<OccupancyDto>)
    )
)]
pub async fn occupancy(
    State(state): State<AppState>,
    scope: TenantScope,
) -> ApiResult<OccupancyDto> {
    let occupancy = state
        .reports
        .occupancy(&scope.customer_id)
        .await
        .map_err(domain_error)?;
    ok(occupancy.into())
}
