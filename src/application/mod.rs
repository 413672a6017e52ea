//! Application layer: use-case services over the domain repositories

pub mod identity;
pub mod services;

pub use identity::{AuthResult, IdentityService, NewAdmin, NewUser};
pub use services::{
    CheckIn, CheckOut, CheckOutReceipt, CustomerService, GateService, Occupancy, ParkingService,
    ParkingSettings, ReportService, RevenueReport, SubscriptionService, TariffService,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::domain::{CreateUserDto, RepositoryProvider, User, UserRole};
    use crate::infrastructure::database::repositories::test_support::seed_customer;
    use crate::infrastructure::database::{test_database, SeaOrmRepositoryProvider};

    /// Migrated in-memory database with tenant `EPMS-0001`
    pub async fn repos() -> Arc<dyn RepositoryProvider> {
        let db = test_database().await;
        seed_customer(&db, "EPMS-0001").await;
        Arc::new(SeaOrmRepositoryProvider::new(db))
    }

    pub async fn add_staff(
        repos: &Arc<dyn RepositoryProvider>,
        customer_id: &str,
        email: &str,
        role: UserRole,
    ) -> User {
        repos
            .users()
            .create(CreateUserDto {
                customer_id: Some(customer_id.into()),
                email: email.into(),
                first_name: "Test".into(),
                last_name: "User".into(),
                phone_number: None,
                role,
                password_hash: "x".into(),
                is_superuser: false,
            })
            .await
            .unwrap()
    }
}
