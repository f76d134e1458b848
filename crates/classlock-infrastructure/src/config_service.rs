//! Configuration service implementation.
//!
//! Loads `ClasslockConfig` from `~/.config/classlock/config.toml` or from an
//! explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use classlock_core::config::ClasslockConfig;
use classlock_core::error::{ClasslockError, Result};

use crate::paths::ClasslockPaths;

/// Reads the Classlock configuration file.
///
/// A missing or blank file yields the default configuration; a file that
/// exists but does not parse is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: ClasslockPaths::config_file()?,
        })
    }

    /// Creates a service for a custom config path (CLI flag, tests)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ClasslockConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", self.path);
            return Ok(ClasslockConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ClasslockError::io(format!(
                "Failed to read config file at {:?}: {}",
                self.path, e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(ClasslockConfig::default());
        }

        let config = ClasslockConfig::from_toml_str(&content)?;
        tracing::info!(
            "[Config] Loaded {:?} ({} apps, {} groups)",
            self.path,
            config.apps.len(),
            config.groups.as_ref().map_or(0, Vec::len)
        );
        Ok(config)
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn write_default_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, ClasslockConfig::default().to_toml_string()?)?;
        tracing::info!("[Config] Wrote default config to {:?}", self.path);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("absent.toml"));

        assert_eq!(service.load().unwrap(), ClasslockConfig::default());
    }

    #[test]
    fn test_blank_file_gives_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"   \n").unwrap();
        file.flush().unwrap();

        let config = ConfigService::with_path(file.path()).load().unwrap();
        assert_eq!(config, ClasslockConfig::default());
    }

    #[test]
    fn test_loads_custom_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[sync]
delay_ms = 20

[log]
level = "debug"
"#,
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigService::with_path(file.path()).load().unwrap();
        assert_eq!(config.sync.delay_ms, 20);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[sync\ndelay_ms = ").unwrap();
        file.flush().unwrap();

        let err = ConfigService::with_path(file.path()).load().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_write_default_if_missing() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("nested").join("config.toml"));

        assert!(service.write_default_if_missing().unwrap());
        assert!(!service.write_default_if_missing().unwrap());
        assert_eq!(service.load().unwrap(), ClasslockConfig::default());
    }
}
