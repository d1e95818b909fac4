//! Platform directory resolution for the host.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// An I/O error occurred (e.g., directory creation failed).
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the host keeps `config.ron` and its log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "nebula-lifecycle";

impl PlatformDirs {
    /// Resolve OS-conventional directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_dir = config_base.join(APP_NAME);
        Ok(Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        })
    }

    /// Use an explicit config directory (the `--config` flag); logs go in a
    /// `logs` subdirectory of it.
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_resolve() {
        let Ok(dirs) = PlatformDirs::resolve() else {
            // Headless CI images may not expose a config directory.
            return;
        };
        assert!(dirs.config_dir.is_absolute());
        assert!(dirs.config_dir.ends_with("nebula-lifecycle/config"));
        assert!(dirs.log_dir.ends_with("nebula-lifecycle/logs"));
    }

    #[test]
    fn test_explicit_config_dir() {
        let root = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(root.path());
        assert_eq!(dirs.config_dir, root.path());
        assert_eq!(dirs.log_dir, root.path().join("logs"));
    }

    #[test]
    fn test_directory_creation() {
        let root = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(&root.path().join("host"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlatformError::NoConfigDir.to_string(),
            "could not determine OS configuration directory"
        );
        let io = PlatformError::from(io::Error::other("disk full"));
        assert_eq!(io.to_string(), "platform I/O error: disk full");
    }
}
