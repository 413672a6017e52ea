//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::application::{
    CustomerService, GateService, IdentityService, ParkingService, ParkingSettings,
    ReportService, SubscriptionService, TariffService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::interfaces::http::middleware::AuthState;

/// Every service the API needs, cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub customers: Arc<CustomerService>,
    pub gates: Arc<GateService>,
    pub tariffs: Arc<TariffService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub parking: Arc<ParkingService>,
    pub reports: Arc<ReportService>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt_config: JwtConfig,
        hash_cost: u32,
        settings: ParkingSettings,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let currency = settings.currency.clone();
        Self {
            identity: Arc::new(
                IdentityService::new(repos.clone(), jwt_config).with_hash_cost(hash_cost),
            ),
            customers: Arc::new(CustomerService::new(repos.clone())),
            gates: Arc::new(GateService::new(repos.clone())),
            tariffs: Arc::new(TariffService::new(repos.clone())),
            subscriptions: Arc::new(SubscriptionService::new(repos.clone())),
            parking: Arc::new(ParkingService::new(repos.clone(), settings)),
            reports: Arc::new(ReportService::new(repos, currency)),
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            jwt_config: s.identity.jwt_config().clone(),
        }
    }
}
