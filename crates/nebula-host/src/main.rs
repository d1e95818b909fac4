//! The binary entry point for the Nebula lifecycle host.

mod components;
mod platform;
mod script;

use clap::Parser;
use nebula_config::{CliArgs, Config};

use crate::platform::PlatformDirs;

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(path) => PlatformDirs::with_config_dir(path),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    nebula_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(config = %dirs.config_dir.display(), logs = %dirs.log_dir.display(), "Nebula lifecycle host starting");

    if let Err(e) = script::run(&config) {
        tracing::error!(error = %e, "Lifecycle run failed");
        std::process::exit(1);
    }
}
