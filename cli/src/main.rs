//! Skill Swap directory: CLI server
//!
//! Headless REST server suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/skill-swap/config.toml)
//! skill-swap
//!
//! # Custom config path
//! skill-swap --config /etc/skill-swap/config.toml
//!
//! # Override port
//! skill-swap --api-port 9090
//!
//! # Validate config without starting
//! skill-swap --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use skillswap::config::AppConfig;
use skillswap::server::{init_tracing, ServerHandle, ServerOptions};

/// Skill Swap: find people by skill and trade what you know.
#[derive(Parser, Debug)]
#[command(
    name = "skill-swap",
    version,
    about = "Skill-exchange directory REST server",
    long_about = "Skill Swap: users list offered and wanted skills, search each other \
                  by skill and negotiate one-to-one swaps with ratings.\n\n\
                  Default config: ~/.config/skill-swap/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SKILLSWAP_CONFIG")]
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
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(skillswap::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        let mut config = loaded?;
        if let Some(port) = cli.api_port {
            config.server.api_port = port;
        }
        if let Some(level) = cli.log_level {
            config.logging.level = level;
        }
        config.validate()?;

        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
        println!(
            "   Verify swap participants : {}",
            config.directory.verify_swap_participants
        );
        return Ok(());
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
