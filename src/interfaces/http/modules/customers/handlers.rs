//! Customer REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AssignAdministratorRequest, CreateCustomerRequest, CustomerDto, ListCustomersParams,
    UpdateCustomerRequest,
};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::state::AppState;
use crate::shared::PaginationParams;

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(ListCustomersParams),
    responses(
        (status = 200, description = "Customer list", body = ApiResponse<PaginatedResponse<CustomerDto>>),
        (status = 403, description = "Superuser access required")
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(params): Query<ListCustomersParams>,
) -> ApiResult<PaginatedResponse<CustomerDto>> {
    caller.require_superuser()?;
    let result = state
        .customers
        .list(PaginationParams::new(params.page, params.limit))
        .await
        .map_err(domain_error)?;
    ok(PaginatedResponse::from_result(result, CustomerDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("customer_id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(customer_id): Path<String>,
) -> ApiResult<CustomerDto> {
    // Staff may read their own tenant
    if !caller.can_see(Some(&customer_id)) {
        caller.require_superuser()?;
    }
    let customer = state.customers.get(&customer_id).await.map_err(domain_error)?;
    ok(customer.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer enrolled", body = ApiResponse<CustomerDto>),
        (status = 409, description = "Duplicate id or email")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), ApiError> {
    caller.require_superuser()?;
    let customer = state
        .customers
        .create(request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(customer.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("customer_id" = String, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(customer_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> ApiResult<CustomerDto> {
    caller.require_superuser()?;
    let customer = state
        .customers
        .update(&customer_id, request.into())
        .await
        .map_err(domain_error)?;
    ok(customer.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("customer_id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer and all its data deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(customer_id): Path<String>,
) -> ApiResult<()> {
    caller.require_superuser()?;
    state
        .customers
        .delete(&customer_id)
        .await
        .map_err(domain_error)?;
    ok(())
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{customer_id}/administrator",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("customer_id" = String, Path, description = "Customer ID")),
    request_body = AssignAdministratorRequest,
    responses(
        (status = 200, description = "Administrator assigned", body = ApiResponse<CustomerDto>),
        (status = 422, description = "User belongs to another tenant")
    )
)]
pub async fn assign_administrator(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(customer_id): Path<String>,
    Json(request): Json<AssignAdministratorRequest>,
) -> ApiResult<CustomerDto> {
    caller.require_superuser()?;
    let customer = state
        .customers
        .assign_administrator(&customer_id, request.user_id)
        .await
        .map_err(domain_error)?;
    ok(customer.into())
}
