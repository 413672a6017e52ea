//! Authentication middleware and tenant scoping for Axum

use std::str::FromStr;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse};

/// Header a superuser sets to act on a specific tenant
pub const TENANT_HEADER: &str = "x-customer-id";

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

/// State needed to verify bearer tokens
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity decoded from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
    pub customer_id: Option<String>,
    pub is_superuser: bool,
}

/// What a request is about to do, from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated user of the tenant
    Read,
    /// Check vehicles in and out
    Operate,
    /// Subscriptions and reports
    Manage,
    /// Staff, gates and tariffs
    Administer,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.sub.parse().ok()?,
            email: claims.email,
            role: UserRole::from_str(&claims.role).ok()?,
            customer_id: claims.customer_id,
            is_superuser: claims.is_superuser,
        })
    }

    pub fn allows(&self, access: Access) -> bool {
        if self.is_superuser {
            return true;
        }
        match access {
            Access::Read => true,
            Access::Operate => self.role.can_operate(),
            Access::Manage => self.role.can_manage(),
            Access::Administer => self.role == UserRole::Admin,
        }
    }

    pub fn require(&self, access: Access) -> Result<(), ApiError> {
        if self.allows(access) {
            Ok(())
        } else {
            Err(error_response(
                StatusCode::FORBIDDEN,
                "Insufficient permissions",
            ))
        }
    }

    pub fn require_superuser(&self) -> Result<(), ApiError> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(error_response(
                StatusCode::FORBIDDEN,
                "Superuser access required",
            ))
        }
    }

    /// Tenant the request acts on. Superusers may pick one, everyone else
    /// is pinned to their own.
    pub fn tenant(&self, requested: Option<&str>) -> Result<String, ApiError> {
        match (requested, self.customer_id.as_deref()) {
            (Some(req), _) if self.is_superuser => Ok(req.to_string()),
            (Some(req), Some(own)) if req != own => Err(error_response(
                StatusCode::FORBIDDEN,
                "Access to another tenant is not allowed",
            )),
            (_, Some(own)) => Ok(own.to_string()),
            (_, None) => Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("No tenant selected; set the {} header", TENANT_HEADER),
            )),
        }
    }

    /// Whether a row owned by `customer_id` is visible to this user
    pub fn can_see(&self, customer_id: Option<&str>) -> bool {
        self.is_superuser || (customer_id.is_some() && customer_id == self.customer_id.as_deref())
    }
}

/// Authenticated user plus the tenant the request is scoped to.
///
/// Extracting it requires `auth_middleware` to have run.
#[derive(Clone, Debug)]
pub struct TenantScope {
    pub user: AuthenticatedUser,
    pub customer_id: String,
}

impl TenantScope {
    pub fn require(&self, access: Access) -> Result<(), ApiError> {
        self.user.require(access)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for TenantScope {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not authenticated"))?;
        let requested = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let customer_id = user.tenant(requested)?;
        Ok(Self { user, customer_id })
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(user) = AuthenticatedUser::from_claims(claims) else {
                return auth_error_response(AuthError::InvalidToken);
            };
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
    };

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, tenant: Option<&str>, superuser: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            email: "u@epms.local".into(),
            role,
            customer_id: tenant.map(String::from),
            is_superuser: superuser,
        }
    }

    #[test]
    fn role_permissions() {
        let viewer = user(UserRole::Viewer, Some("EPMS-0001"), false);
        assert!(viewer.allows(Access::Read));
        assert!(!viewer.allows(Access::Operate));

        let cashier = user(UserRole::Cashier, Some("EPMS-0001"), false);
        assert!(cashier.allows(Access::Operate));
        assert!(!cashier.allows(Access::Manage));

        let manager = user(UserRole::Manager, Some("EPMS-0001"), false);
        assert!(manager.allows(Access::Manage));
        assert!(!manager.allows(Access::Administer));

        let root = user(UserRole::Viewer, None, true);
        assert!(root.allows(Access::Administer));
    }

    #[test]
    fn tenant_selection() {
        let cashier = user(UserRole::Cashier, Some("EPMS-0001"), false);
        assert_eq!(cashier.tenant(None).unwrap(), "EPMS-0001");
        assert_eq!(cashier.tenant(Some("EPMS-0001")).unwrap(), "EPMS-0001");
        assert_eq!(
            cashier.tenant(Some("EPMS-0002")).unwrap_err().0,
            StatusCode::FORBIDDEN
        );

        let root = user(UserRole::Admin, None, true);
        assert_eq!(root.tenant(Some("EPMS-0002")).unwrap(), "EPMS-0002");
        assert_eq!(root.tenant(None).unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn visibility_of_rows() {
        let admin = user(UserRole::Admin, Some("EPMS-0001"), false);
        assert!(admin.can_see(Some("EPMS-0001")));
        assert!(!admin.can_see(Some("EPMS-0002")));
        assert!(!admin.can_see(None));
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
    }
}
