//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod customer_repository;
pub mod gate_repository;
pub mod parking_log_repository;
pub mod repository_provider;
pub mod subscription_repository;
pub mod tariff_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

// ── Error mapping shared by all repositories ────────────────────

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Unique-constraint violations become `Conflict`, anything else a database error.
pub(crate) fn conflict_or_db_err(e: DbErr, message: impl FnOnce() -> String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message()),
        _ => db_err(e),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    use crate::infrastructure::database::entities::customer;

    pub async fn seed_customer(db: &DatabaseConnection, customer_id: &str) {
        customer::ActiveModel {
            customer_id: Set(customer_id.to_string()),
            client_type: Set(None),
            administrator_id: Set(None),
            company_name: Set(Some(format!("{} Parking", customer_id))),
            email: Set(None),
            contact: Set(None),
            address: Set(None),
            geolocation: Set(None),
            country: Set(None),
            comments: Set(None),
            enrollment_date: Set(None),
        }
        .insert(db)
        .await
        .expect("seed customer");
    }
}
