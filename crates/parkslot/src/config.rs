//! Configuration management for parkslot.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "parkslot";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "slots.db";

/// Largest slot count that still yields slot numbers of at most ten characters.
pub const SLOT_COUNT_CEILING: u32 = 999_999_999;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PARKSLOT_`, sections separated by
///    `__`, e.g. `PARKSLOT_SLOTS__MAX_SLOTS`)
/// 2. TOML config file at `~/.config/parkslot/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Slot set configuration.
    pub slots: SlotsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/parkslot/slots.db`
    pub database_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// Slot set configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotsConfig {
    /// Upper bound accepted by the initialize operation.
    pub max_slots: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self { max_slots: 1000 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `PARKSLOT_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&config_file))
                .merge(Env::prefixed("PARKSLOT_").split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.slots.max_slots == 0 || self.slots.max_slots > SLOT_COUNT_CEILING {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_slots must be between 1 and {SLOT_COUNT_CEILING}, got {}",
                    self.slots.max_slots
                ),
            });
        }

        self.listen_addr()?;
        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse::<SocketAddr>()
            .or_else(|_| format!("[{}]:{}", self.server.host, self.server.port).parse())
            .map_err(|_| Error::ConfigValidation {
                message: format!("invalid server host: {}", self.server.host),
            })
    }
}
