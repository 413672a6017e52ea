use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{ParkingLog, ParkingLogQuery, RevenueTotals};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait ParkingLogRepository: Send + Sync {
    /// `Conflict` when the plate already has a `parked` session in the tenant
    async fn create(&self, log: ParkingLog) -> DomainResult<ParkingLog>;
    async fn find_by_id(&self, customer_id: &str, ticket_id: Uuid)
        -> DomainResult<Option<ParkingLog>>;
    /// Open session of a plate, if the vehicle is inside
    async fn find_open_by_plate(
        &self,
        customer_id: &str,
        plate_number: &str,
    ) -> DomainResult<Option<ParkingLog>>;
    async fn list(&self, query: ParkingLogQuery) -> DomainResult<PaginatedResult<ParkingLog>>;
    async fn open_sessions(&self, customer_id: &str) -> DomainResult<Vec<ParkingLog>>;
    async fn count_open(&self, customer_id: &str) -> DomainResult<u64>;
    /// Persist a closed session. Only a row that is still `parked` is
    /// written; an already closed ticket is a `Conflict`.
    async fn close(&self, log: ParkingLog) -> DomainResult<ParkingLog>;
    async fn delete(&self, customer_id: &str, ticket_id: Uuid) -> DomainResult<()>;
    /// Totals over sessions closed with a check-in date in `from..=to`
    async fn revenue(
        &self,
        customer_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<RevenueTotals>;
}
