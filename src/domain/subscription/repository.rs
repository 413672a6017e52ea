use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Subscription, SubscriptionQuery};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: Subscription) -> DomainResult<Subscription>;
    async fn find_by_id(
        &self,
        customer_id: &str,
        subscription_id: i32,
    ) -> DomainResult<Option<Subscription>>;
    async fn list(&self, query: SubscriptionQuery) -> DomainResult<PaginatedResult<Subscription>>;
    /// Pass for `plate_number` valid on `day`; the one ending last wins
    async fn find_active(
        &self,
        customer_id: &str,
        plate_number: &str,
        day: NaiveDate,
    ) -> DomainResult<Option<Subscription>>;
    async fn update(&self, subscription: Subscription) -> DomainResult<Subscription>;
    async fn delete(&self, customer_id: &str, subscription_id: i32) -> DomainResult<()>;
}
