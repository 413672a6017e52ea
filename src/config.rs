//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/epms/config.toml`). Every
//! section and field has a default, so a missing file or a partial one is
//! valid.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{NewAdmin, ParkingSettings};
use crate::domain::CreateCustomerDto;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub tenant: TenantConfig,
    pub parking: ParkingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Grace period for in-flight requests on shutdown, seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

/// Either a full `url` or a SQLite file `path`; `url` wins when both are set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            path: "./epms.db".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Superuser seeded on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@epms.local".to_string(),
            password: "admin12345".to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
        }
    }
}

/// Tenant seeded on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    pub customer_id: String,
    pub company_name: String,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            customer_id: "EPMS-0001".to_string(),
            company_name: "EPMS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    pub currency: String,
    /// Offset of the lot's wall clock from UTC, in minutes
    pub utc_offset_minutes: i32,
    pub default_entry_gate: String,
    pub default_exit_gate: String,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        let settings = ParkingSettings::default();
        Self {
            currency: settings.currency,
            utc_offset_minutes: 0,
            default_entry_gate: settings.default_entry_gate,
            default_exit_gate: settings.default_exit_gate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `epms=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "security.bcrypt_cost must be between 4 and 31".into(),
            ));
        }
        if self.tenant.customer_id.trim().is_empty() {
            return Err(ConfigError::Invalid("tenant.customer_id is empty".into()));
        }
        self.utc_offset()?;
        Ok(())
    }

    fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.parking.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "parking.utc_offset_minutes out of range: {}",
                self.parking.utc_offset_minutes
            ))
        })
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.connection_url(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(
            self.security.jwt_secret.clone(),
            self.security.jwt_expiration_hours,
        )
    }

    pub fn parking_settings(&self) -> Result<ParkingSettings, ConfigError> {
        Ok(ParkingSettings {
            currency: self.parking.currency.clone(),
            utc_offset: self.utc_offset()?,
            default_entry_gate: self.parking.default_entry_gate.clone(),
            default_exit_gate: self.parking.default_exit_gate.clone(),
        })
    }

    pub fn default_tenant(&self) -> CreateCustomerDto {
        CreateCustomerDto {
            customer_id: self.tenant.customer_id.clone(),
            company_name: Some(self.tenant.company_name.clone()),
            ..Default::default()
        }
    }

    pub fn default_admin(&self) -> NewAdmin {
        NewAdmin {
            email: self.admin.email.clone(),
            password: self.admin.password.clone(),
            customer_id: Some(self.tenant.customer_id.clone()),
            first_name: self.admin.first_name.clone(),
            last_name: self.admin.last_name.clone(),
            contact: None,
        }
    }
}

/// `~/.config/epms/config.toml`, or `./config.toml` when there is no
/// config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("epms").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [parking]
            currency = "KES"
            utc_offset_minutes = 180
            "#,
        )
        .unwrap();

        assert_eq!(config.server.api_port, 9090);
        assert_eq!(config.server.api_host, "0.0.0.0");
        assert_eq!(config.tenant.customer_id, "EPMS-0001");

        let settings = config.parking_settings().unwrap();
        assert_eq!(settings.currency, "KES");
        assert_eq!(settings.utc_offset.local_minus_utc(), 3 * 3600);
        assert_eq!(settings.default_entry_gate, "SouthGate");
    }

    #[test]
    fn url_takes_precedence_over_path() {
        let mut db = DatabaseSection::default();
        assert_eq!(db.connection_url(), "sqlite://./epms.db?mode=rwc");

        db.url = Some("postgres://epms@localhost/epms".into());
        assert_eq!(db.connection_url(), "postgres://epms@localhost/epms");

        db.url = Some("  ".into());
        assert_eq!(db.connection_url(), "sqlite://./epms.db?mode=rwc");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("epms-no-such-dir/config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.jwt_expiration_hours, 24);
    }

    #[test]
    fn broken_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("epms-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\napi_port = ").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = AppConfig::default();
        config.parking.utc_offset_minutes = 24 * 60;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn seeded_admin_belongs_to_default_tenant() {
        let config = AppConfig::default();
        assert_eq!(config.default_admin().customer_id.as_deref(), Some("EPMS-0001"));
        assert_eq!(config.default_tenant().company_name.as_deref(), Some("EPMS"));
    }
}
