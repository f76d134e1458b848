//! A sync backend that only waits.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use classlock_core::error::Result;
use classlock_core::sync::{DashboardSnapshot, SyncBackend, SyncReport};

/// Stands in for a remote service: sleeps for a fixed delay, then reports
/// that everything in the snapshot was synced. It never fails.
#[derive(Debug, Clone)]
pub struct SimulatedSyncBackend {
    delay: Duration,
}

impl SimulatedSyncBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SyncBackend for SimulatedSyncBackend {
    async fn push(&self, snapshot: &DashboardSnapshot) -> Result<SyncReport> {
        let started_at = Utc::now();
        tracing::debug!("[Sync] Simulating remote push ({:?})", self.delay);
        tokio::time::sleep(self.delay).await;

        Ok(SyncReport {
            started_at,
            finished_at: Utc::now(),
            groups_synced: snapshot.groups.len(),
            classes_synced: snapshot.classes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classlock_core::seed;

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            catalog: seed::default_catalog(),
            groups: Vec::new(),
            locks: seed::default_lock_items(),
            classes: seed::default_classes(),
            settings: seed::default_settings(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_waits_for_delay() {
        let backend = SimulatedSyncBackend::new(Duration::from_millis(1500));
        let before = tokio::time::Instant::now();

        let report = backend.push(&snapshot()).await.unwrap();

        assert!(before.elapsed() >= Duration::from_millis(1500));
        assert_eq!(report.classes_synced, 4);
        assert_eq!(report.groups_synced, 0);
        assert!(report.finished_at >= report.started_at);
    }
}
