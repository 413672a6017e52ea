//! # EPMS
//!
//! Multi-tenant parking lot management: tenants, staff, gates, tariff
//! buckets, subscriptions and parking sessions.
//!
//! ## Architecture
//!
//! - **domain**: entities, value types, repository traits and pricing rules
//! - **application**: use-case services orchestrating the repositories
//! - **infrastructure**: SeaORM persistence, migrations, JWT and bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **config** / **server**: TOML configuration and the server runtime

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
