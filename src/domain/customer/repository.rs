use async_trait::async_trait;

use super::Customer;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Fails with `Conflict` on a duplicate id or email.
    async fn create(&self, customer: Customer) -> DomainResult<Customer>;
    async fn find_by_id(&self, customer_id: &str) -> DomainResult<Option<Customer>>;
    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Customer>>;
    async fn update(&self, customer: Customer) -> DomainResult<Customer>;
    /// Removes the tenant together with every row it owns.
    async fn delete(&self, customer_id: &str) -> DomainResult<()>;
    /// Unset `administrator_id` wherever it points at `user_id`; returns the
    /// number of tenants touched.
    async fn clear_administrator(&self, user_id: i32) -> DomainResult<u64>;
}
