//! User management API handlers
//!
//! Tenant admins manage their own staff; superusers manage everyone.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateAdminRequest, CreateUserRequest, ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::{NewAdmin, NewUser};
use crate::domain::{DomainError, GetUserDto, UpdateUserDto, User, UserRole};
use crate::interfaces::http::common::{
    domain_error, error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{Access, AuthenticatedUser, TenantScope};
use crate::interfaces::http::state::AppState;
use crate::shared::PaginationParams;

fn parse_role(role: &str) -> Result<UserRole, ApiError> {
    UserRole::from_str(role).map_err(domain_error)
}

/// Load a user the caller is allowed to see; others look like 404.
async fn visible_user(state: &AppState, scope: &TenantScope, user_id: i32) -> Result<User, ApiError> {
    let user = state.identity.get_user(user_id).await.map_err(domain_error)?;
    if !scope.user.can_see(user.customer_id.as_deref()) {
        return Err(domain_error(DomainError::not_found("User", "user_id", user_id)));
    }
    Ok(user)
}

/// Load a user the caller may change. Superuser accounts are off limits to
/// tenant admins.
async fn managed_user(state: &AppState, scope: &TenantScope, user_id: i32) -> Result<User, ApiError> {
    let user = visible_user(state, scope, user_id).await?;
    if user.is_superuser && !scope.user.is_superuser {
        return Err(error_response(
            StatusCode::FORBIDDEN,
            "Superuser accounts can only be managed by a superuser",
        ));
    }
    Ok(user)
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    scope: TenantScope,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    scope.require(Access::Administer)?;
    let dto = GetUserDto {
        customer_id: Some(scope.customer_id.clone()),
        search: params.search,
        role: params.role.as_deref().map(parse_role).transpose()?,
        pagination: PaginationParams::new(params.page, params.limit),
        sort_by: params.sort_by,
    };

    let result = state.identity.list_users(dto).await.map_err(domain_error)?;
    ok(PaginatedResponse::from_result(result, UserDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<i32>,
) -> ApiResult<UserDto> {
    if scope.user.user_id != id {
        scope.require(Access::Administer)?;
    }
    ok(visible_user(&state, &scope, id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    scope: TenantScope,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    scope.require(Access::Administer)?;
    let user = state
        .identity
        .add_user(NewUser {
            customer_id: scope.customer_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            password: request.password,
            role: parse_role(&request.role)?,
        })
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/admins",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Superuser created", body = ApiResponse<UserDto>),
        (status = 403, description = "Superuser access required")
    )
)]
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    caller.require_superuser()?;
    let user = state
        .identity
        .create_admin(NewAdmin {
            email: request.email,
            password: request.password,
            customer_id: request.customer_id,
            first_name: request.first_name,
            last_name: request.last_name,
            contact: request.contact,
        })
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Target is a superuser"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    scope.require(Access::Administer)?;
    managed_user(&state, &scope, id).await?;

    let dto = UpdateUserDto {
        first_name: request.first_name,
        last_name: request.last_name,
        phone_number: request.phone_number,
        role: request.role.as_deref().map(parse_role).transpose()?,
        is_active: request.is_active,
    };
    let user = state.identity.update_user(id, dto).await.map_err(domain_error)?;
    ok(user.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Target is a superuser"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    scope.require(Access::Administer)?;
    if scope.user.user_id == id {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Cannot delete your own account",
        ));
    }
    managed_user(&state, &scope, id).await?;
    state.identity.delete_user(id).await.map_err(domain_error)?;
    ok(())
}
