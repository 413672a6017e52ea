//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    CustomerRepository, GateRepository, ParkingLogRepository, SubscriptionRepository,
    TariffRepository, UserRepository,
};

use super::customer_repository::SeaOrmCustomerRepository;
use super::gate_repository::SeaOrmGateRepository;
use super::parking_log_repository::SeaOrmParkingLogRepository;
use super::subscription_repository::SeaOrmSubscriptionRepository;
use super::tariff_repository::SeaOrmTariffRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let gate = repos.gates().find_by_name("EPMS-0001", "SouthGate").await?;
/// let parked = repos.parking_logs().open_sessions("EPMS-0001").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    customers: SeaOrmCustomerRepository,
    users: SeaOrmUserRepository,
    gates: SeaOrmGateRepository,
    tariffs: SeaOrmTariffRepository,
    subscriptions: SeaOrmSubscriptionRepository,
    parking_logs: SeaOrmParkingLogRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            gates: SeaOrmGateRepository::new(db.clone()),
            tariffs: SeaOrmTariffRepository::new(db.clone()),
            subscriptions: SeaOrmSubscriptionRepository::new(db.clone()),
            parking_logs: SeaOrmParkingLogRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn gates(&self) -> &dyn GateRepository {
        &self.gates
    }

    fn tariffs(&self) -> &dyn TariffRepository {
        &self.tariffs
    }

    fn subscriptions(&self) -> &dyn SubscriptionRepository {
        &self.subscriptions
    }

    fn parking_logs(&self) -> &dyn ParkingLogRepository {
        &self.parking_logs
    }
}
