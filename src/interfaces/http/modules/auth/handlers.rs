//! Authentication API handlers

use axum::{extract::State, Extension};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::domain::UserChangePasswordDto;
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state
        .identity
        .authenticate(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    ok(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: auth.user.into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<UserDto> {
    let user = state
        .identity
        .get_user(user.user_id)
        .await
        .map_err(domain_error)?;
    ok(user.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Current password is wrong")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    state
        .identity
        .change_password(
            user.user_id,
            UserChangePasswordDto {
                current_password: request.current_password,
                new_password: request.new_password,
            },
        )
        .await
        .map_err(domain_error)?;
    ok(())
}
