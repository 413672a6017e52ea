//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::{conflict_or_db_err, db_err};
use crate::domain::{Customer, CustomerRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;
use crate::shared::{PaginatedResult, PaginationParams};

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: customer::Model) -> Customer {
    Customer {
        customer_id: m.customer_id,
        client_type: m.client_type,
        administrator_id: m.administrator_id,
        company_name: m.company_name,
        email: m.email,
        contact: m.contact,
        address: m.address,
        geolocation: m.geolocation,
        country: m.country,
        comments: m.comments,
        enrollment_date: m.enrollment_date,
    }
}

fn domain_to_active(c: Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        customer_id: Set(c.customer_id),
        client_type: Set(c.client_type),
        administrator_id: Set(c.administrator_id),
        company_name: Set(c.company_name),
        email: Set(c.email),
        contact: Set(c.contact),
        address: Set(c.address),
        geolocation: Set(c.geolocation),
        country: Set(c.country),
        comments: Set(c.comments),
        enrollment_date: Set(c.enrollment_date),
    }
}

// ── SeaOrmCustomerRepository ────────────────────────────────────

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, c: Customer) -> DomainResult<Customer> {
        let id = c.customer_id.clone();
        let model = domain_to_active(c)
            .insert(&self.db)
            .await
            .map_err(|e| {
                conflict_or_db_err(e, || format!("Customer {} or its email already exists", id))
            })?;
        info!("Customer created: {}", model.customer_id);
        Ok(entity_to_domain(model))
    }

    async fn find_by_id(&self, customer_id: &str) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(customer_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Customer>> {
        let query = customer::Entity::find().order_by_asc(customer::Column::CustomerId);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(PaginatedResult::new(
            models.into_iter().map(entity_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn update(&self, c: Customer) -> DomainResult<Customer> {
        let id = c.customer_id.clone();
        match domain_to_active(c).update(&self.db).await {
            Ok(model) => Ok(entity_to_domain(model)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("Customer", "customer_id", id)),
            Err(e) => Err(conflict_or_db_err(e, || {
                format!("Email of customer {} is already used", id)
            })),
        }
    }

    async fn delete(&self, customer_id: &str) -> DomainResult<()> {
        let result = customer::Entity::delete_by_id(customer_id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Customer", "customer_id", customer_id));
        }
        info!("Customer deleted: {}", customer_id);
        Ok(())
    }

    async fn clear_administrator(&self, user_id: i32) -> DomainResult<u64> {
        let result = customer::Entity::update_many()
            .col_expr(customer::Column::AdministratorId, Expr::value(Option::<i32>::None))
            .filter(customer::Column::AdministratorId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected > 0 {
            info!("Administrator {} unassigned from {} tenant(s)", user_id, result.rows_affected);
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateCustomerDto;
    use crate::infrastructure::database::test_database;

    fn customer(id: &str, email: Option<&str>) -> Customer {
        Customer::new(CreateCustomerDto {
            customer_id: id.into(),
            company_name: Some("Harbor Parking".into()),
            email: email.map(Into::into),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        repo.create(customer("EPMS-0001", Some("ops@harbor.test")))
            .await
            .unwrap();

        let found = repo.find_by_id("EPMS-0001").await.unwrap().unwrap();
        assert_eq!(found.company_name.as_deref(), Some("Harbor Parking"));
        assert!(repo.find_by_id("EPMS-9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_key_is_conflict() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        repo.create(customer("EPMS-0001", None)).await.unwrap();
        let err = repo.create(customer("EPMS-0001", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        repo.create(customer("EPMS-0001", Some("ops@harbor.test")))
            .await
            .unwrap();
        let err = repo
            .create(customer("EPMS-0002", Some("ops@harbor.test")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        let err = repo.update(customer("EPMS-0404", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_is_paginated() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        for i in 1..=3 {
            repo.create(customer(&format!("EPMS-000{}", i), None))
                .await
                .unwrap();
        }
        let page = repo
            .find_all(PaginationParams::new(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].customer_id, "EPMS-0003");
    }

    #[tokio::test]
    async fn clear_administrator_only_touches_matching_rows() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        let mut first = customer("EPMS-0001", None);
        first.administrator_id = Some(7);
        repo.create(first).await.unwrap();
        let mut second = customer("EPMS-0002", None);
        second.administrator_id = Some(8);
        repo.create(second).await.unwrap();

        assert_eq!(repo.clear_administrator(7).await.unwrap(), 1);
        assert_eq!(repo.clear_administrator(7).await.unwrap(), 0);

        let first = repo.find_by_id("EPMS-0001").await.unwrap().unwrap();
        let second = repo.find_by_id("EPMS-0002").await.unwrap().unwrap();
        assert_eq!(first.administrator_id, None);
        assert_eq!(second.administrator_id, Some(8));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let repo = SeaOrmCustomerRepository::new(test_database().await);
        repo.create(customer("EPMS-0001", None)).await.unwrap();
        repo.delete("EPMS-0001").await.unwrap();
        assert!(matches!(
            repo.delete("EPMS-0001").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
