//! Gate REST API handlers

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateGateRequest, GateDto, UpdateGateRequest};
use crate::domain::{CreateGateDto, GateFlow, UpdateGateDto};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::{Access, TenantScope};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/gates",
    tag = "Gates",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Gates of the tenant", body = ApiResponse<Vec<GateDto>>))
)]
pub async fn list_gates(State(state): State<AppState>, scope: TenantScope) -> ApiResult<Vec<GateDto>> {
    let gates = state
        .gates
        .list(&scope.customer_id)
        .await
        .map_err(domain_error)?;
    ok(gates.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/gates/{gate_id}",
    tag = "Gates",
    security(("bearer_auth" = [])),
    params(("gate_id" = i32, Path, description = "Gate ID")),
    responses(
        (status = 200, description = "Gate details", body = ApiResponse<GateDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_gate(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(gate_id): Path<i32>,
) -> ApiResult<GateDto> {
    let gate = state
        .gates
        .get(&scope.customer_id, gate_id)
        .await
        .map_err(domain_error)?;
    ok(gate.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/gates",
    tag = "Gates",
    security(("bearer_auth" = [])),
    request_body = CreateGateRequest,
    responses(
        (status = 201, description = "Gate added", body = ApiResponse<GateDto>),
        (status = 409, description = "Name already used in the tenant")
    )
)]
pub async fn create_gate(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateGateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GateDto>>), ApiError> {
    scope.require(Access::Administer)?;
    let flow = GateFlow::from_str(&request.flow).map_err(domain_error)?;
    let gate = state
        .gates
        .create(CreateGateDto {
            customer_id: scope.customer_id,
            name: request.name,
            flow,
            description: request.description,
            cashier_name: request.cashier_name,
            camera: request.camera.into(),
        })
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(gate.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/gates/{gate_id}",
    tag = "Gates",
    security(("bearer_auth" = [])),
    params(("gate_id" = i32, Path, description = "Gate ID")),
    request_body = UpdateGateRequest,
    responses(
        (status = 200, description = "Gate updated", body = ApiResponse<GateDto>),
        (status = 409, description = "Name already used in the tenant")
    )
)]
pub async fn update_gate(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(gate_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateGateRequest>,
) -> ApiResult<GateDto> {
    scope.require(Access::Administer)?;
    let dto = UpdateGateDto::try_from(request).map_err(domain_error)?;
    let gate = state
        .gates
        .update(&scope.customer_id, gate_id, dto)
        .await
        .map_err(domain_error)?;
    ok(gate.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/gates/{gate_id}",
    tag = "Gates",
    security(("bearer_auth" = [])),
    params(("gate_id" = i32, Path, description = "Gate ID")),
    responses(
        (status = 200, description = "Gate deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_gate(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(gate_id): Path<i32>,
) -> ApiResult<()> {
    scope.require(Access::Administer)?;
    state
        .gates
        .delete(&scope.customer_id, gate_id)
        .await
        .map_err(domain_error)?;
    ok(())
}
