//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::DomainError;

/// Staff role within a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    /// Full control over the tenant's configuration and staff
    Admin,
    /// Subscriptions, reports and day-to-day operations
    Manager,
    /// Gate operator checking vehicles in and out
    Cashier,
    /// Read-only access
    #[default]
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
            Self::Viewer => "viewer",
        }
    }

    /// Admin or manager
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Anyone allowed to check vehicles in and out
    pub fn can_operate(&self) -> bool {
        !matches!(self, Self::Viewer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            "viewer" => Ok(Self::Viewer),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

/// Staff user, identified by email
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i32,
    pub customer_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub password_hash: String,
    /// Platform operator allowed to manage tenants
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn belongs_to(&self, customer_id: &str) -> bool {
        self.customer_id.as_deref() == Some(customer_id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}
