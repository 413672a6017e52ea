//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::User;

/// User API representation; the password hash never leaves the server
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub user_id: i32,
    pub customer_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            full_name: u.full_name(),
            user_id: u.user_id,
            customer_id: u.customer_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            phone_number: u.phone_number,
            role: u.role.to_string(),
            is_superuser: u.is_superuser,
            is_active: u.is_active,
            date_joined: u.date_joined,
            last_login_at: u.last_login_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(max = 150))]
    #[serde(default)]
    pub last_name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// admin, manager, cashier or viewer
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "cashier".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    pub customer_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Matches email, first or last name
    pub search: Option<String>,
    pub role: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// email, name or role; newest first otherwise
    pub sort_by: Option<String>,
}
