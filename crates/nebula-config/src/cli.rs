//! Command-line argument parsing for the lifecycle host.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ShutdownOrder};

/// Host command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "nebula-host", about = "Nebula lifecycle host")]
pub struct CliArgs {
    /// Server address.
    #[arg(long)]
    pub server: Option<String>,

    /// Server port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Combined shutdown order (clients-first, server-first).
    #[arg(long)]
    pub shutdown_order: Option<ShutdownOrder>,

    /// Maximum simultaneous client connections (0 = unlimited).
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref addr) = args.server {
            self.network.server_address = addr.clone();
        }
        if let Some(port) = args.port {
            self.network.server_port = port;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(order) = args.shutdown_order {
            self.lifecycle.shutdown_order = order;
        }
        if let Some(max) = args.max_connections {
            self.lifecycle.max_connections = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            server: Some("192.168.1.1".to_string()),
            shutdown_order: Some(ShutdownOrder::ServerFirst),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.network.server_address, "192.168.1.1");
        assert_eq!(config.lifecycle.shutdown_order, ShutdownOrder::ServerFirst);
        // Non-overridden fields retain defaults
        assert_eq!(config.network.server_port, 7777);
        assert_eq!(config.lifecycle.max_connections, 64);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "nebula-host",
            "--shutdown-order",
            "server-first",
            "--max-connections",
            "8",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.shutdown_order, Some(ShutdownOrder::ServerFirst));
        assert_eq!(args.max_connections, Some(8));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
