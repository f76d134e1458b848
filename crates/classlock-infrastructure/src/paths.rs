//! Path management for Classlock configuration files.
//!
//! ```text
//! ~/.config/classlock/         # Config directory (platform config dir)
//! └── config.toml              # Catalog, initial groups, sync and log settings
//! ```

use std::path::PathBuf;

use classlock_core::error::{ClasslockError, Result};

const APP_DIR: &str = "classlock";
const CONFIG_FILE: &str = "config.toml";

pub struct ClasslockPaths;

impl ClasslockPaths {
    /// Returns the Classlock configuration directory (e.g., `~/.config/classlock/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ClasslockError::config("Cannot find config directory"))
    }

    /// Returns the default configuration file path.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        // Some CI sandboxes have no config dir at all.
        if let Ok(path) = ClasslockPaths::config_file() {
            assert!(path.ends_with("classlock/config.toml"));
        }
    }
}
