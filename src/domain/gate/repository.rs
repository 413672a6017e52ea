use async_trait::async_trait;

use super::{CreateGateDto, Gate, UpdateGateDto};
use crate::domain::DomainResult;

/// Gate storage, always scoped to one tenant.
#[async_trait]
pub trait GateRepository: Send + Sync {
    /// Fails with `Conflict` when the name is already used in the tenant.
    async fn create(&self, dto: CreateGateDto) -> DomainResult<Gate>;
    async fn find_by_id(&self, customer_id: &str, gate_id: i32) -> DomainResult<Option<Gate>>;
    async fn find_by_name(&self, customer_id: &str, name: &str) -> DomainResult<Option<Gate>>;
    async fn find_all(&self, customer_id: &str) -> DomainResult<Vec<Gate>>;
    async fn update(&self, customer_id: &str, gate_id: i32, dto: UpdateGateDto)
        -> DomainResult<Gate>;
    async fn delete(&self, customer_id: &str, gate_id: i32) -> DomainResult<()>;
}
