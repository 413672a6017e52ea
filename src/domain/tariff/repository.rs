//! Tariff repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Tariff;
use crate::domain::DomainResult;

#[async_trait]
pub trait TariffRepository: Send + Sync {
    async fn create(&self, tariff: Tariff) -> DomainResult<Tariff>;
    async fn find_by_id(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<Option<Tariff>>;
    /// All buckets of a tenant ordered by `from_minutes`
    async fn find_all(&self, customer_id: &str) -> DomainResult<Vec<Tariff>>;
    /// Buckets with `from_minutes <= minutes <= to_minutes`, ordered by `from_minutes`
    async fn find_matching(&self, customer_id: &str, minutes: i64) -> DomainResult<Vec<Tariff>>;
    async fn update(&self, tariff: Tariff) -> DomainResult<Tariff>;
    async fn delete(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<()>;
}
