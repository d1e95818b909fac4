//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Lifecycle dispatcher settings.
    pub lifecycle: LifecycleConfig,
    /// Network/multiplayer settings.
    pub network: NetworkConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Order in which a combined shutdown tears down the two lifecycles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShutdownOrder {
    /// Close every client connection, then destroy the game session.
    #[default]
    ClientsFirst,
    /// Destroy the game session, then close every client connection.
    ServerFirst,
}

impl std::str::FromStr for ShutdownOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "clientsfirst" => Ok(Self::ClientsFirst),
            "serverfirst" => Ok(Self::ServerFirst),
            other => Err(format!(
                "unknown shutdown order '{other}' (expected clients-first or server-first)"
            )),
        }
    }
}

/// Lifecycle dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Interleaving used when the host quits with a session and connections live.
    pub shutdown_order: ShutdownOrder,
    /// Let a fatal creation-hook error abort the whole transition.
    /// When false, fatal errors are treated like refusals.
    pub abort_on_fatal: bool,
    /// Convert panics inside hooks into hook errors instead of unwinding.
    pub catch_panics: bool,
    /// Maximum simultaneous client connections (0 = unlimited).
    pub max_connections: u32,
}

/// Network/multiplayer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Server address for multiplayer.
    pub server_address: String,
    /// Server port.
    pub server_port: u16,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shutdown_order: ShutdownOrder::ClientsFirst,
            abort_on_fatal: true,
            catch_panics: true,
            max_connections: 64,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            server_port: 7777,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values the host cannot label connections with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.server_address.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "network.server_address",
                reason: "must not be blank".to_string(),
            });
        }
        if self.network.server_port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.server_port",
                reason: "port 0 cannot be dialed".to_string(),
            });
        }
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
