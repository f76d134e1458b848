//! Settings panel domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClasslockError, Result};

/// Section and setting id of the master app-blocking switch.
pub const GLOBAL_BLOCKING: (&str, &str) = ("app-control", "global-blocking");

/// One choice of a select setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The control type of a setting together with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Switch { value: bool },
    Select { value: String, options: Vec<SelectOption> },
}

/// A value submitted for a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    /// Interprets user input: `on`/`true`/`yes` and `off`/`false`/`no` become
    /// booleans, anything else is kept as text.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "on" | "true" | "yes" => SettingValue::Bool(true),
            "off" | "false" | "no" => SettingValue::Bool(false),
            _ => SettingValue::Text(input.trim().to_string()),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(true) => write!(f, "on"),
            SettingValue::Bool(false) => write!(f, "off"),
            SettingValue::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(flatten)]
    pub kind: SettingKind,
}

impl Setting {
    pub fn switch(id: impl Into<String>, label: impl Into<String>, value: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            badge: None,
            kind: SettingKind::Switch { value },
        }
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            badge: None,
            kind: SettingKind::Select {
                value: value.into(),
                options,
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn value(&self) -> SettingValue {
        match &self.kind {
            SettingKind::Switch { value } => SettingValue::Bool(*value),
            SettingKind::Select { value, .. } => SettingValue::Text(value.clone()),
        }
    }

    /// Applies `new_value` if it fits the setting's kind.
    fn apply(&mut self, new_value: SettingValue) -> Result<()> {
        match (&mut self.kind, new_value) {
            (SettingKind::Switch { value }, SettingValue::Bool(next)) => {
                *value = next;
                Ok(())
            }
            (SettingKind::Select { value, options }, SettingValue::Text(next)) => {
                if !options.iter().any(|o| o.value == next) {
                    let allowed: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                    return Err(ClasslockError::validation(format!(
                        "'{}' is not an option for '{}' (expected one of: {})",
                        next,
                        self.id,
                        allowed.join(", ")
                    )));
                }
                *value = next;
                Ok(())
            }
            (SettingKind::Switch { .. }, SettingValue::Text(text)) => Err(
                ClasslockError::validation(format!("'{}' expects on/off, got '{}'", self.id, text)),
            ),
            (SettingKind::Select { .. }, SettingValue::Bool(_)) => Err(ClasslockError::validation(
                format!("'{}' expects one of its options, not on/off", self.id),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub settings: Vec<Setting>,
}

/// All settings sections, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPanel {
    sections: Vec<SettingsSection>,
}

impl SettingsPanel {
    pub fn new(sections: Vec<SettingsSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn setting(&self, section_id: &str, setting_id: &str) -> Option<&Setting> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)?
            .settings
            .iter()
            .find(|s| s.id == setting_id)
    }

    /// Changes one setting and returns it.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the section or setting does not exist
    /// - `Validation` when the value does not fit the setting
    pub fn update(
        &mut self,
        section_id: &str,
        setting_id: &str,
        value: SettingValue,
    ) -> Result<Setting> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| ClasslockError::not_found("settings section", section_id))?;
        let setting = section
            .settings
            .iter_mut()
            .find(|s| s.id == setting_id)
            .ok_or_else(|| {
                ClasslockError::not_found("setting", format!("{}/{}", section_id, setting_id))
            })?;
        setting.apply(value)?;
        Ok(setting.clone())
    }

    pub fn switch_value(&self, section_id: &str, setting_id: &str) -> Option<bool> {
        match self.setting(section_id, setting_id)?.kind {
            SettingKind::Switch { value } => Some(value),
            SettingKind::Select { .. } => None,
        }
    }

    pub fn select_value(&self, section_id: &str, setting_id: &str) -> Option<&str> {
        match &self.setting(section_id, setting_id)?.kind {
            SettingKind::Select { value, .. } => Some(value.as_str()),
            SettingKind::Switch { .. } => None,
        }
    }

    /// Whether the master app-blocking switch is on. Missing means off.
    pub fn global_blocking_enabled(&self) -> bool {
        self.switch_value(GLOBAL_BLOCKING.0, GLOBAL_BLOCKING.1)
            .unwrap_or(false)
    }
}
