//! Server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection, migrations,
//! tenant/admin seeding, the REST API and graceful shutdown.

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::infrastructure::{init_database, Migrator};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the default tenant and superuser when missing (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use epms::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Services shared with the request handlers.
    pub state: AppState,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub api_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, seed and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting EPMS service...");

        let db_config = app_cfg.database_config();
        let jwt_config = app_cfg.jwt_config();
        let settings = app_cfg.parking_settings()?;
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let state = AppState::new(
            db.clone(),
            jwt_config,
            app_cfg.security.bcrypt_cost,
            settings,
        );

        if opts.create_default_admin {
            match state
                .identity
                .bootstrap(app_cfg.default_tenant(), app_cfg.default_admin())
                .await
            {
                Ok(()) => info!(
                    tenant = %app_cfg.tenant.customer_id,
                    admin = %app_cfg.admin.email,
                    "Default tenant and admin ready"
                ),
                Err(e) => error!("Failed to seed default tenant/admin: {}", e),
            }
        }

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_router = create_api_router(state.clone());
        let bind = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
        let listener = tokio::net::TcpListener::bind(&bind).await?;
        let api_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            state,
            config: app_cfg,
            api_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for in-flight requests (bounded by `server.shutdown_timeout`),
    /// then close the database.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let api_task = self.api_task;
        let drained = self
            .shutdown
            .run_cleanup(async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if drained {
            info!("REST API server stopped");
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("EPMS service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down EPMS service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config. `RUST_LOG` overrides
/// `logging.level`.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".into();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = Some("sqlite::memory:".into());
        config.database.max_connections = 1;
        config.security.bcrypt_cost = 4;
        ServerOptions {
            config,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn starts_seeds_and_stops() {
        let handle = ServerHandle::start(options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.api_addr.port(), 0);

        let customer = handle.state.customers.get("EPMS-0001").await.unwrap();
        assert!(customer.administrator_id.is_some());
        let auth = handle
            .state
            .identity
            .authenticate("admin@epms.local", "admin12345")
            .await
            .unwrap();
        assert!(auth.user.is_superuser);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_refused() {
        let mut opts = options();
        opts.config.security.jwt_secret = String::new();
        assert!(ServerHandle::start(opts).await.is_err());
    }
}
