use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use classlock_core::ClasslockError;
use classlock_core::error::Result;
use classlock_core::sync::{DashboardSnapshot, SyncBackend, SyncReport};

use crate::activity_layer::ACTIVITY_TARGET;

/// Runs one sync at a time against a [`SyncBackend`].
///
/// While a sync is running further requests fail with `Conflict`, the way the
/// "Sync Now" button is disabled until the previous sync finishes.
#[derive(Clone)]
pub struct SyncService {
    backend: Arc<dyn SyncBackend>,
    in_progress: Arc<AtomicBool>,
}

/// Clears the in-progress flag on every exit path, including a dropped future.
struct InProgressGuard(Arc<AtomicBool>);

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SyncService {
    pub fn new(backend: Arc<dyn SyncBackend>) -> Self {
        Self {
            backend,
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub async fn sync(&self, snapshot: DashboardSnapshot) -> Result<SyncReport> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClasslockError::conflict("A sync is already in progress"));
        }
        let _guard = InProgressGuard(self.in_progress.clone());

        tracing::info!("[Sync] Starting sync");
        match self.backend.push(&snapshot).await {
            Ok(report) => {
                tracing::info!(
                    target: ACTIVITY_TARGET,
                    detail = "Your settings have been synchronized across all devices",
                    "Sync Complete"
                );
                tracing::info!(
                    "[Sync] Finished: {} groups, {} classes",
                    report.groups_synced,
                    report.classes_synced
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("[Sync] Failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use classlock_core::seed;
    use tokio::sync::Notify;

    /// Backend that holds every push until released.
    struct GatedBackend {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SyncBackend for GatedBackend {
        async fn push(&self, snapshot: &DashboardSnapshot) -> Result<SyncReport> {
            self.release.notified().await;
            let now = Utc::now();
            Ok(SyncReport {
                started_at: now,
                finished_at: now,
                groups_synced: snapshot.groups.len(),
                classes_synced: snapshot.classes.len(),
            })
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl SyncBackend for FailingBackend {
        async fn push(&self, _snapshot: &DashboardSnapshot) -> Result<SyncReport> {
            Err(ClasslockError::io("network unreachable"))
        }
    }

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            catalog: seed::default_catalog(),
            groups: Vec::new(),
            locks: Vec::new(),
            classes: seed::default_classes(),
            settings: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_second_sync_is_rejected_while_running() {
        let release = Arc::new(Notify::new());
        let service = SyncService::new(Arc::new(GatedBackend {
            release: release.clone(),
        }));

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.sync(snapshot()).await }
        });
        while !service.is_syncing() {
            tokio::task::yield_now().await;
        }

        let err = service.sync(snapshot()).await.unwrap_err();
        assert!(err.is_conflict());

        release.notify_one();
        let report = first.await.unwrap().unwrap();
        assert_eq!(report.classes_synced, 4);
        assert!(!service.is_syncing());
    }

    #[tokio::test]
    async fn test_failed_sync_clears_flag() {
        let service = SyncService::new(Arc::new(FailingBackend));

        assert!(service.sync(snapshot()).await.is_err());
        assert!(!service.is_syncing());
    }
}
