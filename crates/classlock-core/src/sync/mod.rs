//! Sync domain models and the backend trait.
//!
//! Classlock has no real backend. A sync pushes a [`DashboardSnapshot`] to a
//! [`SyncBackend`]; the shipped backend only waits and reports success.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_group::{App, AppGroup};
use crate::app_lock::AppLockItem;
use crate::class_schedule::ClassEntry;
use crate::error::Result;
use crate::settings::SettingsSection;

/// A point-in-time copy of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub catalog: Vec<App>,
    pub groups: Vec<AppGroup>,
    pub locks: Vec<AppLockItem>,
    pub classes: Vec<ClassEntry>,
    pub settings: Vec<SettingsSection>,
}

/// Outcome of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub groups_synced: usize,
    pub classes_synced: usize,
}

/// Destination for dashboard snapshots.
///
/// Implementations decide where a snapshot goes (nowhere, a file, a remote
/// API). `push` must either deliver the whole snapshot or fail.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    /// Pushes a snapshot and reports what was synced.
    async fn push(&self, snapshot: &DashboardSnapshot) -> Result<SyncReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    use crate::seed;

    /// Keeps every pushed snapshot.
    #[derive(Default)]
    struct RecordingBackend {
        pushed: Mutex<Vec<DashboardSnapshot>>,
    }

    #[async_trait]
    impl SyncBackend for RecordingBackend {
        async fn push(&self, snapshot: &DashboardSnapshot) -> Result<SyncReport> {
            let now = Utc::now();
            self.pushed.lock().unwrap().push(snapshot.clone());
            Ok(SyncReport {
                started_at: now,
                finished_at: now,
                groups_synced: snapshot.groups.len(),
                classes_synced: snapshot.classes.len(),
            })
        }
    }

    #[tokio::test]
    async fn test_backend_behind_trait_object() {
        let recording = Arc::new(RecordingBackend::default());
        let backend: Arc<dyn SyncBackend> = recording.clone();
        let snapshot = DashboardSnapshot {
            catalog: seed::default_catalog(),
            groups: Vec::new(),
            locks: seed::default_lock_items(),
            classes: seed::default_classes(),
            settings: seed::default_settings(),
        };

        let report = backend.push(&snapshot).await.unwrap();

        assert_eq!(report.classes_synced, 4);
        assert_eq!(recording.pushed.lock().unwrap().as_slice(), &[snapshot]);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let now = Utc::now();
        let report = SyncReport {
            started_at: now,
            finished_at: now,
            groups_synced: 2,
            classes_synced: 4,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["groupsSynced"], 2);
        assert_eq!(json["classesSynced"], 4);
    }
}
