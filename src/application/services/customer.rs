//! Tenant accounts

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateCustomerDto, Customer, DomainError, DomainResult, RepositoryProvider, UpdateCustomerDto,
};
use crate::shared::{PaginatedResult, PaginationParams};

const CUSTOMER_ID_MAX: usize = 50;
const COMMENTS_MAX: usize = 500;

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, dto: CreateCustomerDto) -> DomainResult<Customer> {
        let customer = Customer::new(dto);
        validate(&customer)?;
        let created = self.repos.customers().create(customer).await?;
        info!(customer_id = %created.customer_id, "Customer enrolled");
        Ok(created)
    }

    pub async fn get(&self, customer_id: &str) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "customer_id", customer_id))
    }

    pub async fn list(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Customer>> {
        self.repos.customers().find_all(page).await
    }

    pub async fn update(
        &self,
        customer_id: &str,
        dto: UpdateCustomerDto,
    ) -> DomainResult<Customer> {
        let mut customer = self.get(customer_id).await?;
        customer.apply(dto);
        validate(&customer)?;
        self.repos.customers().update(customer).await
    }

    /// Drops the tenant and everything it owns.
    pub async fn delete(&self, customer_id: &str) -> DomainResult<()> {
        self.repos.customers().delete(customer_id).await?;
        info!(customer_id, "Customer deleted");
        Ok(())
    }

    /// Make one of the tenant's own users its administrator.
    pub async fn assign_administrator(
        &self,
        customer_id: &str,
        user_id: i32,
    ) -> DomainResult<Customer> {
        let mut customer = self.get(customer_id).await?;
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "user_id", user_id))?;
        if !user.belongs_to(customer_id) {
            return Err(DomainError::Validation(format!(
                "user {} does not belong to {}",
                user, customer_id
            )));
        }

        customer.administrator_id = Some(user_id);
        let updated = self.repos.customers().update(customer).await?;
        info!(customer_id, user_id, "Administrator assigned");
        Ok(updated)
    }
}

fn validate(customer: &Customer) -> DomainResult<()> {
    if customer.customer_id.is_empty() || customer.customer_id.len() > CUSTOMER_ID_MAX {
        return Err(DomainError::Validation(format!(
            "customer id must be 1-{} characters",
            CUSTOMER_ID_MAX
        )));
    }
    if let Some(ref comments) = customer.comments {
        if comments.chars().count() > COMMENTS_MAX {
            return Err(DomainError::Validation(format!(
                "comments exceed {} characters",
                COMMENTS_MAX
            )));
        }
    }
    if let Some(ref email) = customer.email {
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{add_staff, repos};
    use crate::domain::UserRole;

    fn acme(id: &str) -> CreateCustomerDto {
        CreateCustomerDto {
            customer_id: id.into(),
            company_name: Some("Acme Parking".into()),
            email: Some("Ops@Acme.test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_and_update() {
        let svc = CustomerService::new(repos().await);
        let created = svc.create(acme("EPMS-0002")).await.unwrap();
        assert_eq!(created.email.as_deref(), Some("ops@acme.test"));

        let updated = svc
            .update(
                "EPMS-0002",
                UpdateCustomerDto {
                    country: Some("Kenya".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.country.as_deref(), Some("Kenya"));
        assert_eq!(updated.company_name.as_deref(), Some("Acme Parking"));
    }

    #[tokio::test]
    async fn duplicate_id_conflicts() {
        let svc = CustomerService::new(repos().await);
        let err = svc
            .create(CreateCustomerDto {
                customer_id: "EPMS-0001".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn long_comments_are_rejected() {
        let svc = CustomerService::new(repos().await);
        let mut dto = acme("EPMS-0003");
        dto.comments = Some("x".repeat(501));
        assert!(matches!(
            svc.create(dto).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn administrator_must_belong_to_tenant() {
        let repos = repos().await;
        let svc = CustomerService::new(repos.clone());
        svc.create(acme("EPMS-0002")).await.unwrap();
        let outsider = add_staff(&repos, "EPMS-0001", "out@epms.local", UserRole::Admin).await;
        let insider = add_staff(&repos, "EPMS-0002", "in@acme.test", UserRole::Admin).await;

        assert!(matches!(
            svc.assign_administrator("EPMS-0002", outsider.user_id).await,
            Err(DomainError::Validation(_))
        ));
        let customer = svc
            .assign_administrator("EPMS-0002", insider.user_id)
            .await
            .unwrap();
        assert_eq!(customer.administrator_id, Some(insider.user_id));
    }

    #[tokio::test]
    async fn delete_cascades_to_users() {
        let repos = repos().await;
        let svc = CustomerService::new(repos.clone());
        svc.create(acme("EPMS-0002")).await.unwrap();
        let user = add_staff(&repos, "EPMS-0002", "in@acme.test", UserRole::Cashier).await;

        svc.delete("EPMS-0002").await.unwrap();
        assert!(repos.users().find_by_id(user.user_id).await.unwrap().is_none());
        assert!(matches!(
            svc.get("EPMS-0002").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
