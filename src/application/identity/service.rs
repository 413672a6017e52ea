//! Identity service: staff accounts and authentication
//!
//! HTTP handlers stay thin and delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    CreateCustomerDto, CreateUserDto, Customer, DomainError, DomainResult, GetUserDto,
    RepositoryProvider, UpdateUserDto, User, UserChangePasswordDto, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password, DEFAULT_COST};
use crate::shared::PaginatedResult;

const MIN_PASSWORD_LEN: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Staff member added to a tenant
#[derive(Debug, Clone)]
pub struct NewUser {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub role: UserRole,
}

/// Superuser created at bootstrap or by another superuser
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub customer_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub contact: Option<String>,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    hash_cost: u32,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost (tests use the minimum)
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a bearer token.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(email = %email, "Failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;
        self.repos.users().touch_last_login(user.user_id).await?;

        info!(user_id = user.user_id, email = %user.email, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Add a staff member to a tenant.
    pub async fn add_user(&self, new: NewUser) -> DomainResult<User> {
        validate_credentials(&new.email, &new.password)?;
        if self
            .repos
            .customers()
            .find_by_id(&new.customer_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(
                "Customer",
                "customer_id",
                &new.customer_id,
            ));
        }

        let user = self
            .repos
            .users()
            .create(CreateUserDto {
                customer_id: Some(new.customer_id),
                email: normalize_email(&new.email),
                first_name: new.first_name.trim().to_string(),
                last_name: new.last_name.trim().to_string(),
                phone_number: new.phone_number,
                role: new.role,
                password_hash: self.hash(&new.password)?,
                is_superuser: false,
            })
            .await?;

        info!(user_id = user.user_id, email = %user.email, role = %user.role, "User added");
        Ok(user)
    }

    /// Create a superuser administrator.
    pub async fn create_admin(&self, new: NewAdmin) -> DomainResult<User> {
        validate_credentials(&new.email, &new.password)?;
        if let Some(ref customer_id) = new.customer_id {
            if self.repos.customers().find_by_id(customer_id).await?.is_none() {
                return Err(DomainError::not_found("Customer", "customer_id", customer_id));
            }
        }

        let user = self
            .repos
            .users()
            .create(CreateUserDto {
                customer_id: new.customer_id,
                email: normalize_email(&new.email),
                first_name: new.first_name.trim().to_string(),
                last_name: new.last_name.trim().to_string(),
                phone_number: new.contact,
                role: UserRole::Admin,
                password_hash: self.hash(&new.password)?,
                is_superuser: true,
            })
            .await?;

        info!(user_id = user.user_id, email = %user.email, "Superuser created");
        Ok(user)
    }

    /// Seed the default tenant and its superuser when they are missing.
    pub async fn bootstrap(&self, tenant: CreateCustomerDto, admin: NewAdmin) -> DomainResult<()> {
        let customer_id = tenant.customer_id.clone();
        if self.repos.customers().find_by_id(&customer_id).await?.is_none() {
            self.repos.customers().create(Customer::new(tenant)).await?;
            info!(customer_id = %customer_id, "Default tenant created");
        }

        let email = normalize_email(&admin.email);
        let admin_id = match self.repos.users().find_by_email(&email).await? {
            Some(existing) => existing.user_id,
            None => {
                self.create_admin(NewAdmin {
                    customer_id: Some(customer_id.clone()),
                    ..admin
                })
                .await?
                .user_id
            }
        };

        if let Some(mut customer) = self.repos.customers().find_by_id(&customer_id).await? {
            if customer.administrator_id.is_none() {
                customer.administrator_id = Some(admin_id);
                self.repos.customers().update(customer).await?;
            }
        }
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "user_id", user_id))
    }

    pub async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list(dto).await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn update_user(&self, user_id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        self.repos.users().update(user_id, dto).await
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: i32,
        dto: UserChangePasswordDto,
    ) -> DomainResult<()> {
        if dto.new_password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let user = self.get_user(user_id).await?;
        let valid = verify_password(&dto.current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = self.hash(&dto.new_password)?;
        self.repos.users().update_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Delete a user, unassigning it from any tenant it administers.
    pub async fn delete_user(&self, user_id: i32) -> DomainResult<()> {
        self.get_user(user_id).await?;
        self.repos.customers().clear_administrator(user_id).await?;
        self.repos.users().delete(user_id).await?;
        info!(user_id, "User deleted");
        Ok(())
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.hash_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::repos;
    use crate::infrastructure::crypto::jwt::verify_token;

    async fn service() -> IdentityService {
        IdentityService::new(repos().await, JwtConfig::new("test", 1)).with_hash_cost(4)
    }

    fn cashier(email: &str) -> NewUser {
        NewUser {
            customer_id: "EPMS-0001".into(),
            first_name: "Amina".into(),
            last_name: "Njeri".into(),
            email: email.into(),
            phone_number: None,
            password: "gate-pass-1".into(),
            role: UserRole::Cashier,
        }
    }

    #[tokio::test]
    async fn add_user_then_authenticate() {
        let svc = service().await;
        let user = svc.add_user(cashier("Gate@EPMS.local")).await.unwrap();
        assert_eq!(user.email, "gate@epms.local");
        assert_ne!(user.password_hash, "gate-pass-1");

        let auth = svc
            .authenticate("gate@epms.local", "gate-pass-1")
            .await
            .unwrap();
        let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.customer_id.as_deref(), Some("EPMS-0001"));
        assert_eq!(claims.role, "cashier");

        let reloaded = svc.get_user(user.user_id).await.unwrap();
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service().await;
        svc.add_user(cashier("gate@epms.local")).await.unwrap();
        let err = svc.add_user(cashier("GATE@epms.local")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found() {
        let svc = service().await;
        let mut new = cashier("gate@epms.local");
        new.customer_id = "EPMS-9999".into();
        assert!(matches!(
            svc.add_user(new).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_disabled_account_are_rejected() {
        let svc = service().await;
        let user = svc.add_user(cashier("gate@epms.local")).await.unwrap();
        assert!(matches!(
            svc.authenticate("gate@epms.local", "nope-nope").await,
            Err(DomainError::Unauthorized(_))
        ));

        svc.update_user(
            user.user_id,
            UpdateUserDto {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(matches!(
            svc.authenticate("gate@epms.local", "gate-pass-1").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = service().await;
        let user = svc.add_user(cashier("gate@epms.local")).await.unwrap();

        let err = svc
            .change_password(
                user.user_id,
                UserChangePasswordDto {
                    current_password: "wrong-one".into(),
                    new_password: "brand-new-pass".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        svc.change_password(
            user.user_id,
            UserChangePasswordDto {
                current_password: "gate-pass-1".into(),
                new_password: "brand-new-pass".into(),
            },
        )
        .await
        .unwrap();
        svc.authenticate("gate@epms.local", "brand-new-pass")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn short_password_is_invalid() {
        let svc = service().await;
        let mut new = cashier("gate@epms.local");
        new.password = "short".into();
        assert!(matches!(
            svc.add_user(new).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn deleting_administrator_unassigns_tenant() {
        let svc = service().await;
        let manager = svc.add_user(cashier("lead@epms.local")).await.unwrap();
        let mut customer = svc
            .repos
            .customers()
            .find_by_id("EPMS-0001")
            .await
            .unwrap()
            .unwrap();
        customer.administrator_id = Some(manager.user_id);
        svc.repos.customers().update(customer).await.unwrap();

        svc.delete_user(manager.user_id).await.unwrap();

        let customer = svc
            .repos
            .customers()
            .find_by_id("EPMS-0001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.administrator_id, None);
        assert!(matches!(
            svc.delete_user(manager.user_id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let svc = service().await;
        let tenant = CreateCustomerDto {
            customer_id: "EPMS-0100".into(),
            company_name: Some("Default Lot".into()),
            ..Default::default()
        };
        let admin = NewAdmin {
            email: "admin@epms.local".into(),
            password: "admin-pass-1".into(),
            customer_id: None,
            first_name: "System".into(),
            last_name: "Admin".into(),
            contact: None,
        };

        svc.bootstrap(tenant.clone(), admin.clone()).await.unwrap();
        svc.bootstrap(tenant, admin).await.unwrap();

        let auth = svc
            .authenticate("admin@epms.local", "admin-pass-1")
            .await
            .unwrap();
        assert!(auth.user.is_superuser);
        assert!(auth.user.belongs_to("EPMS-0100"));

        let customer = svc
            .repos
            .customers()
            .find_by_id("EPMS-0100")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.administrator_id, Some(auth.user.user_id));
    }
}
