//! Repository traits for the domain layer
//!
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::customer::CustomerRepository;
use super::gate::GateRepository;
use super::parking_log::ParkingLogRepository;
use super::subscription::SubscriptionRepository;
use super::tariff::TariffRepository;
use super::user::UserRepository;
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let gate = repos.gates().find_by_name("EPMS-0001", "South").await?;
///     let open = repos.parking_logs().count_open("EPMS-0001").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn users(&self) -> &dyn UserRepository;
    fn gates(&self) -> &dyn GateRepository;
    fn tariffs(&self) -> &dyn TariffRepository;
    fn subscriptions(&self) -> &dyn SubscriptionRepository;
    fn parking_logs(&self) -> &dyn ParkingLogRepository;
}
