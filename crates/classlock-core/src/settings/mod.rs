//! Settings panel: notification, app-control and sync preferences.

mod model;

pub use model::{
    GLOBAL_BLOCKING, SelectOption, Setting, SettingKind, SettingValue, SettingsPanel,
    SettingsSection,
};
