//! Default dashboard content.
//!
//! Used when the configuration does not provide its own catalog or groups,
//! and for the lock board, timetable and settings which are not configurable.

use chrono::NaiveTime;

use crate::app_group::App;
use crate::app_lock::AppLockItem;
use crate::class_schedule::ClassEntry;
use crate::settings::{SelectOption, Setting, SettingsSection};

/// The installed-app catalog shipped with Classlock.
pub fn default_catalog() -> Vec<App> {
    vec![
        App::new("1", "Instagram", "Social Media"),
        App::new("2", "TikTok", "Social Media"),
        App::new("3", "Snapchat", "Social Media"),
        App::new("4", "Minecraft", "Games"),
        App::new("5", "Roblox", "Games"),
        App::new("6", "YouTube", "Entertainment"),
        App::new("7", "Netflix", "Entertainment"),
        App::new("8", "Chrome", "Productivity"),
        App::new("9", "Discord", "Communication"),
    ]
}

/// Initial groups as `(name, member ids)` over [`default_catalog`].
pub fn default_group_seeds() -> Vec<(String, Vec<String>)> {
    vec![
        (
            "Social Media".to_string(),
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
        ),
        ("Games".to_string(), vec!["4".to_string(), "5".to_string()]),
    ]
}

pub fn default_lock_items() -> Vec<AppLockItem> {
    vec![
        AppLockItem::new("1", "Instagram", "Social Media", true),
        AppLockItem::new("2", "TikTok", "Social Media", true),
        AppLockItem::new("3", "YouTube", "Entertainment", false),
        AppLockItem::new("4", "Snapchat", "Social Media", true),
        AppLockItem::new("5", "Games", "Entertainment", false),
    ]
}

pub fn default_classes() -> Vec<ClassEntry> {
    let class = |id: &str, name: &str, start: (u32, u32), end: (u32, u32), active, students| ClassEntry {
        id: id.to_string(),
        name: name.to_string(),
        start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or_default(),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or_default(),
        is_active: active,
        students,
        app_group_id: None,
        blocking_enabled: true,
    };

    vec![
        class("1", "Mathematics 101", (9, 0), (10, 30), true, 25),
        class("2", "Physics Lab", (11, 0), (12, 30), false, 18),
        class("3", "English Literature", (14, 0), (15, 30), true, 30),
        class("4", "Computer Science", (16, 0), (17, 30), false, 22),
    ]
}

pub fn default_settings() -> Vec<SettingsSection> {
    vec![
        SettingsSection {
            id: "notifications".to_string(),
            title: "Notifications".to_string(),
            description: "Manage your notification preferences".to_string(),
            settings: vec![
                Setting::switch("class-reminders", "Class Reminders", true)
                    .with_description("Receive notifications before classes start"),
                Setting::switch("app-blocking", "App Blocking Alerts", true)
                    .with_description("Get notified when apps are blocked/unblocked"),
                Setting::select(
                    "reminder-time",
                    "Reminder Time",
                    "15",
                    vec![
                        SelectOption::new("5", "5 minutes before"),
                        SelectOption::new("10", "10 minutes before"),
                        SelectOption::new("15", "15 minutes before"),
                        SelectOption::new("30", "30 minutes before"),
                    ],
                ),
            ],
        },
        SettingsSection {
            id: "app-control".to_string(),
            title: "App Control".to_string(),
            description: "Configure app blocking behavior".to_string(),
            settings: vec![
                Setting::switch("global-blocking", "Global App Blocking", true)
                    .with_description("Enable/disable all app restrictions")
                    .with_badge("Active"),
                Setting::switch("strict-mode", "Strict Mode", false)
                    .with_description("Prevent disabling app blocking during class hours"),
                Setting::select(
                    "block-mode",
                    "Blocking Mode",
                    "smart",
                    vec![
                        SelectOption::new("smart", "Smart (Based on schedule)"),
                        SelectOption::new("manual", "Manual control"),
                        SelectOption::new("always", "Always block"),
                    ],
                ),
            ],
        },
        SettingsSection {
            id: "sync".to_string(),
            title: "Sync & Backup".to_string(),
            description: "Manage your data across devices".to_string(),
            settings: vec![
                Setting::switch("auto-sync", "Auto-Sync", true)
                    .with_description("Automatically sync changes across devices"),
                Setting::select(
                    "sync-frequency",
                    "Sync Frequency",
                    "realtime",
                    vec![
                        SelectOption::new("realtime", "Real-time"),
                        SelectOption::new("hourly", "Hourly"),
                        SelectOption::new("daily", "Daily"),
                    ],
                ),
            ],
        },
    ]
}
