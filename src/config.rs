//! Application configuration loaded from TOML
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 8080
//!
//! [database]
//! url = "sqlite://./skillswap.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "text"
//!
//! [directory]
//! verify_swap_participants = false
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::errors::InfraError;

/// Environment variable that overrides the default config location.
pub const CONFIG_ENV_VAR: &str = "SKILLSWAP_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (e.g. "sqlite://./skillswap.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./skillswap.db?mode=rwc".to_string(),
            max_connections: 10,
            connect_timeout_secs: 8,
        }
    }
}

impl DatabaseConfig {
    /// Config for a SQLite file at `path`, created on first use
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// "text" or "json"
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Require both participants of a swap request to be existing users
    pub verify_swap_participants: bool,
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| InfraError::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| InfraError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        let mut errors = Vec::new();

        if self.server.api_port == 0 {
            errors.push("server.api_port must be greater than 0");
        }
        if self.database.url.trim().is_empty() {
            errors.push("database.url must not be empty");
        }
        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be greater than 0");
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            errors.push("logging.format must be \"text\" or \"json\"");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InfraError::Config(errors.join("; ")))
        }
    }
}

/// `$SKILLSWAP_CONFIG` if set, else `<config_dir>/skill-swap/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skill-swap")
        .join("config.toml")
}
