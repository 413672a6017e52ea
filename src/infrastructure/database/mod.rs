//! SeaORM persistence: entities, migrations and repositories

pub mod entities;
pub mod migrator;
pub mod repositories;

pub use migrator::Migrator;
pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./epms.db?mode=rwc")
    pub url: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./epms.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opt).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh in-memory SQLite database with all migrations applied.
#[cfg(test)]
pub(crate) async fn test_database() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    // One pooled connection: every in-memory connection is its own database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("in-memory sqlite");
    migrator::Migrator::up(&db, None)
        .await
        .expect("migrations apply cleanly");
    db
}
