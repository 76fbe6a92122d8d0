//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! metrics recorder, database init, migrations, REST API and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{DirectoryPolicy, DirectoryService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::shared::errors::{AppError, InfraError};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the directory server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running directory server.
///
/// # Examples
///
/// ```rust,no_run
/// use skillswap::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Directory use cases, shared with the HTTP handlers.
    pub directory: Arc<DirectoryService>,
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub api_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process;
/// restarts within the same process reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder not installed: {}", e);
                None
            }
        })
        .clone()
}

impl ServerHandle {
    /// Start the directory server with the given options.
    ///
    /// This will:
    /// 1. Install Prometheus metrics recorder
    /// 2. Connect to database and run migrations
    /// 3. Build repositories and the directory service
    /// 4. Start REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting Skill Swap directory...");

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database)
            .await
            .map_err(InfraError::from)?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(InfraError::from)?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let policy = DirectoryPolicy::from(&app_cfg.directory);
        let directory = Arc::new(DirectoryService::with_policy(repos.clone(), policy));
        if policy.verify_swap_participants {
            info!("Swap participants must be registered users");
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(directory.clone(), db.clone(), prometheus);

        let bind_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(InfraError::from)?;
        let api_addr = listener.local_addr().map_err(InfraError::from)?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            directory,
            repos,
            config: app_cfg,
            api_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`wait`](Self::wait) to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API task to drain (bounded by `shutdown_timeout`) once
    /// shutdown has been triggered, then close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        info!("Waiting for server tasks to complete...");

        let abort = api_task.abort_handle();
        let drained = shutdown
            .drain(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task failed: {}", e),
                }
            })
            .await;
        if !drained {
            abort.abort();
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Skill Swap directory shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Skill Swap directory...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` overrides `logging.level`.
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
    use crate::config::DatabaseConfig;

    fn free_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    fn test_options(db_path: &std::path::Path) -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".to_string();
        config.server.api_port = free_port();
        config.server.shutdown_timeout = 5;
        config.database = DatabaseConfig::sqlite(&db_path.display().to_string());
        ServerOptions {
            config,
            auto_migrate: true,
        }
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut opts = ServerOptions::default();
        opts.config.database.max_connections = 0;

        let result = ServerHandle::start(opts).await;
        assert!(matches!(result, Err(AppError::Infra(InfraError::Config(_)))));
    }

    #[tokio::test]
    async fn start_serve_and_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let opts = test_options(&dir.path().join("skillswap.db"));

        let handle = ServerHandle::start(opts).await.unwrap();
        assert!(handle.is_running());

        let id = handle
            .directory
            .create_user(crate::domain::CreateUserDto {
                name: Some("Ana".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(handle.repos.users().find_by_id(id).await.unwrap().is_some());

        handle.shutdown().await;
    }
}
