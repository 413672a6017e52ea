//! EPMS parking service
//!
//! ```sh
//! # Run with default config (~/.config/epms/config.toml)
//! epms-service
//!
//! # Custom config path and port
//! epms-service --config /etc/epms/config.toml --api-port 8081
//!
//! # Validate config without starting
//! epms-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use epms::config::{default_config_path, AppConfig};
use epms::server::{init_tracing, ServerHandle, ServerOptions};

/// Multi-tenant parking lot management service.
#[derive(Parser, Debug)]
#[command(
    name = "epms-service",
    version,
    about = "Parking lot management: gates, tariffs, subscriptions and parking sessions",
    long_about = "EPMS REST API server.\n\nDefault config: ~/.config/epms/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EPMS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the default tenant and admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        Err(_) => AppConfig::default(),
    };

    // CLI overrides apply before tracing so --log-level takes effect
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if cli.check {
        if let Err(e) = config.validate() {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Tenant      : {}", config.tenant.customer_id);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
