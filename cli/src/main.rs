//! Shiftdesk CLI server
//!
//! ```sh
//! # Run with default config (~/.config/shiftdesk/config.toml)
//! shiftdesk
//!
//! # Custom config path
//! shiftdesk --config /etc/shiftdesk/config.toml
//!
//! # Validate config without starting
//! shiftdesk --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use shiftdesk::config::AppConfig;
use shiftdesk::server::{init_tracing, ServerHandle, ServerOptions};

/// Shiftdesk: shift requests, approvals and assignments over a REST API.
#[derive(Parser, Debug)]
#[command(
    name = "shiftdesk",
    version,
    about = "Shift scheduling service",
    long_about = "Shiftdesk REST API server for shift catalogs, worker requests \
                  and admin approvals.\n\n\
                  Default config: ~/.config/shiftdesk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SHIFTDESK_CONFIG")]
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

    /// Skip creating the bootstrap admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(shiftdesk::default_config_path);

    // CLI log level must be known before the subscriber is installed
    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            if cli.check {
                eprintln!("Invalid configuration {}: {}", config_path.display(), e);
                std::process::exit(1);
            }
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Duplicates  : {}",
            if config.workflow.reject_duplicate_pending {
                "rejected"
            } else {
                "allowed"
            }
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
