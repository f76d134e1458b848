//! Classlock configuration model.
//!
//! ```toml
//! [[app]]
//! id = "1"
//! name = "Instagram"
//! category = "Social Media"
//!
//! [[group]]
//! name = "Focus"
//! members = ["1"]
//!
//! [sync]
//! delay_ms = 1500
//!
//! [log]
//! level = "info"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_group::{App, AppGroupStore, Catalog};
use crate::error::Result;
use crate::seed;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClasslockConfig {
    /// Installed-app catalog. Empty means the built-in catalog.
    #[serde(rename = "app", default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<App>,
    /// Initial groups. Absent means the built-in groups; an empty list means none.
    #[serde(rename = "group", default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupConfig>>,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Artificial latency of the simulated sync.
    #[serde(default = "default_sync_delay_ms")]
    pub delay_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_sync_delay_ms(),
        }
    }
}

fn default_sync_delay_ms() -> u64 {
    1500
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClasslockConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the catalog, falling back to the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        if self.apps.is_empty() {
            Catalog::new(seed::default_catalog())
        } else {
            Catalog::new(self.apps.clone())
        }
    }

    /// Initial groups as `(name, member ids)`.
    pub fn group_seeds(&self) -> Vec<(String, Vec<String>)> {
        match &self.groups {
            Some(groups) => groups
                .iter()
                .map(|g| (g.name.clone(), g.members.clone()))
                .collect(),
            None if self.apps.is_empty() => seed::default_group_seeds(),
            // Built-in groups reference built-in app ids only.
            None => Vec::new(),
        }
    }

    /// Builds the app group store described by this configuration.
    pub fn build_group_store(&self) -> Result<AppGroupStore> {
        AppGroupStore::with_groups(self.catalog()?, self.group_seeds())
    }

    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_seed_data() {
        let config = ClasslockConfig::default();
        let store = config.build_group_store().unwrap();

        assert_eq!(store.list_catalog().len(), 9);
        assert_eq!(store.groups().len(), 2);
        assert_eq!(config.sync_delay(), Duration::from_millis(1500));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_custom_catalog_and_groups() {
        let config = ClasslockConfig::from_toml_str(
            r#"
            [[app]]
            id = "1"
            name = "Instagram"
            category = "Social Media"

            [[app]]
            id = "4"
            name = "Minecraft"
            category = "Games"

            [[group]]
            name = "Focus"
            members = ["4"]

            [sync]
            delay_ms = 10
            "#,
        )
        .unwrap();

        let store = config.build_group_store().unwrap();
        assert_eq!(store.list_catalog().len(), 2);
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()[0].members, vec!["4"]);
        assert_eq!(config.sync.delay_ms, 10);
    }

    #[test]
    fn test_custom_catalog_without_groups_starts_empty() {
        let config = ClasslockConfig::from_toml_str(
            r#"
            [[app]]
            id = "x"
            name = "Xbox"
            category = "Games"
            "#,
        )
        .unwrap();
        assert!(config.build_group_store().unwrap().groups().is_empty());
    }

    #[test]
    fn test_group_with_unknown_member_is_rejected() {
        let config = ClasslockConfig {
            groups: Some(vec![GroupConfig {
                name: "Broken".to_string(),
                members: vec!["404".to_string()],
            }]),
            ..Default::default()
        };
        assert!(config.build_group_store().unwrap_err().is_validation());
    }

    #[test]
    fn test_toml_round_trip_keeps_sync_settings() {
        let config = ClasslockConfig {
            sync: SyncConfig { delay_ms: 250 },
            ..Default::default()
        };
        let parsed = ClasslockConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
