use std::sync::Arc;

use chrono::NaiveDate;
use classlock_core::ClasslockError;
use classlock_core::app_group::{App, AppGroup, AppGroupStore, SelectionSession, group_by_category};
use classlock_core::app_lock::{AppLockBoard, AppLockItem};
use classlock_core::class_schedule::{
    ClassEntry, ClassFilter, ClassSchedule, CreateClassRequest, parse_schedule_text, render_ics,
};
use classlock_core::error::Result;
use classlock_core::seed;
use classlock_core::settings::{GLOBAL_BLOCKING, Setting, SettingValue, SettingsPanel, SettingsSection};
use classlock_core::sync::{DashboardSnapshot, SyncBackend, SyncReport};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::activity_layer::ACTIVITY_TARGET;
use crate::sync_service::SyncService;

/// All dashboard state, guarded by one lock.
struct DashboardState {
    groups: AppGroupStore,
    /// The single open "Edit Apps" dialog, if any.
    editor: Option<SelectionSession>,
    locks: AppLockBoard,
    classes: ClassSchedule,
    settings: SettingsPanel,
}

impl DashboardState {
    fn editor(&self) -> Result<&SelectionSession> {
        self.editor
            .as_ref()
            .ok_or_else(|| ClasslockError::validation("No app group is being edited"))
    }
}

/// One app row in the group editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorApp {
    pub app: App,
    pub checked: bool,
}

/// One category heading in the group editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorCategory {
    pub category: String,
    pub apps: Vec<EditorApp>,
}

/// What the "Edit Apps" dialog shows: the filtered catalog, grouped by
/// category, with the staged apps checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub group_id: String,
    pub group_name: String,
    pub query: String,
    pub staged_count: usize,
    pub categories: Vec<EditorCategory>,
}

/// Use cases behind every dashboard screen.
///
/// `DashboardService` is cheap to clone; clones share the same state. At most
/// one group editor is open at a time: opening another replaces it.
#[derive(Clone)]
pub struct DashboardService {
    state: Arc<RwLock<DashboardState>>,
    sync: SyncService,
}

impl DashboardService {
    pub fn new(
        groups: AppGroupStore,
        locks: AppLockBoard,
        classes: ClassSchedule,
        settings: SettingsPanel,
        sync_backend: Arc<dyn SyncBackend>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(DashboardState {
                groups,
                editor: None,
                locks,
                classes,
                settings,
            })),
            sync: SyncService::new(sync_backend),
        }
    }

    /// Uses the built-in lock board, timetable and settings.
    pub fn with_defaults(groups: AppGroupStore, sync_backend: Arc<dyn SyncBackend>) -> Self {
        Self::new(
            groups,
            AppLockBoard::new(seed::default_lock_items()),
            ClassSchedule::new(seed::default_classes()),
            SettingsPanel::new(seed::default_settings()),
            sync_backend,
        )
    }

    // ============================================================================
    // Catalog & app groups
    // ============================================================================

    pub async fn list_catalog(&self) -> Vec<App> {
        self.state.read().await.groups.list_catalog().to_vec()
    }

    pub async fn filter_catalog(&self, query: &str) -> Vec<App> {
        let state = self.state.read().await;
        state.groups.filter_catalog(query).into_iter().cloned().collect()
    }

    pub async fn list_groups(&self) -> Vec<AppGroup> {
        self.state.read().await.groups.groups().to_vec()
    }

    pub async fn group_apps(&self, group_id: &str) -> Result<Vec<App>> {
        let state = self.state.read().await;
        Ok(state.groups.group_apps(group_id)?.into_iter().cloned().collect())
    }

    pub async fn create_group(&self, name: &str) -> Result<AppGroup> {
        let group = self.state.write().await.groups.create_group(name)?;
        tracing::info!("[AppGroups] Created group {} ({})", group.name, group.id);
        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} has been created successfully.", group.name),
            "Group Created"
        );
        Ok(group)
    }

    /// Deletes a group and detaches classes that blocked it.
    ///
    /// An editor open on this group stays open; saving it fails with `NotFound`.
    pub async fn delete_group(&self, group_id: &str) -> Result<AppGroup> {
        let mut state = self.state.write().await;
        let removed = state.groups.delete_group(group_id)?;
        let detached = state.classes.clear_group_references(group_id);
        drop(state);

        if detached > 0 {
            tracing::warn!(
                "[AppGroups] {} class(es) no longer block deleted group {}",
                detached,
                removed.id
            );
        }
        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} has been deleted.", removed.name),
            "Group Deleted"
        );
        Ok(removed)
    }

    /// Opens the editor for a group, replacing any editor already open.
    pub async fn open_group_editor(&self, group_id: &str) -> Result<SelectionSession> {
        let mut state = self.state.write().await;
        let session = state.groups.begin_edit_session(group_id)?;
        if let Some(previous) = state.editor.replace(session.clone()) {
            tracing::debug!(
                "[AppGroups] Discarding unsaved edits for {}",
                previous.target_group_id()
            );
            state.groups.discard_edit_session(previous);
        }
        Ok(session)
    }

    pub async fn toggle_staged_app(&self, app_id: &str) -> Result<SelectionSession> {
        let mut state = self.state.write().await;
        let next = state.groups.toggle_staged(state.editor()?, app_id)?;
        state.editor = Some(next.clone());
        Ok(next)
    }

    pub async fn set_editor_query(&self, query: &str) -> Result<SelectionSession> {
        let mut state = self.state.write().await;
        let next = state.editor()?.clone().with_search_query(query);
        state.editor = Some(next.clone());
        Ok(next)
    }

    /// Fails with `NotFound` when the edited group was deleted; `save` or
    /// `cancel` then closes the editor.
    pub async fn editor_view(&self) -> Result<EditorView> {
        let state = self.state.read().await;
        let session = state.editor()?;
        let group_name = state
            .groups
            .get_group(session.target_group_id())
            .map(|g| g.name.clone())
            .ok_or_else(|| ClasslockError::not_found("app group", session.target_group_id()))?;

        let filtered = state.groups.filter_catalog(session.search_query());
        let categories = group_by_category(&filtered)
            .into_iter()
            .map(|group| EditorCategory {
                category: group.category.to_string(),
                apps: group
                    .apps
                    .into_iter()
                    .map(|app| EditorApp {
                        app: app.clone(),
                        checked: session.is_staged(&app.id),
                    })
                    .collect(),
            })
            .collect();

        Ok(EditorView {
            group_id: session.target_group_id().to_string(),
            group_name,
            query: session.search_query().to_string(),
            staged_count: session.staged_member_ids().len(),
            categories,
        })
    }

    /// Commits the open editor and closes it.
    ///
    /// If the group was deleted meanwhile the editor is closed as well and
    /// `NotFound` is returned.
    pub async fn save_group_editor(&self) -> Result<AppGroup> {
        let mut state = self.state.write().await;
        let session = state.editor()?.clone();
        let result = state.groups.commit_edit_session(&session);
        match &result {
            Ok(_) | Err(ClasslockError::NotFound { .. }) => state.editor = None,
            Err(_) => {}
        }
        drop(state);

        let group = result?;
        tracing::info!(
            "[AppGroups] Saved {} app(s) in group {}",
            group.members.len(),
            group.id
        );
        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} apps have been updated.", group.name),
            "Apps Updated"
        );
        Ok(group)
    }

    /// Closes the editor without saving. Returns whether one was open.
    pub async fn cancel_group_editor(&self) -> bool {
        let mut state = self.state.write().await;
        match state.editor.take() {
            Some(session) => {
                state.groups.discard_edit_session(session);
                true
            }
            None => false,
        }
    }

    // ============================================================================
    // App locks
    // ============================================================================

    pub async fn list_locks(&self) -> Vec<AppLockItem> {
        self.state.read().await.locks.list().to_vec()
    }

    pub async fn locked_count(&self) -> usize {
        self.state.read().await.locks.locked_count()
    }

    pub async fn toggle_lock(&self, app_id: &str) -> Result<AppLockItem> {
        let item = self.state.write().await.locks.toggle_lock(app_id)?;
        let (title, verb) = if item.is_locked {
            ("Locked", "locked")
        } else {
            ("Unlocked", "unlocked")
        };
        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} has been {}.", item.name, verb),
            "{} {}",
            item.name,
            title
        );
        Ok(item)
    }

    // ============================================================================
    // Classes
    // ============================================================================

    pub async fn list_classes(&self) -> Vec<ClassEntry> {
        self.state.read().await.classes.list().to_vec()
    }

    pub async fn search_classes(&self, query: &str, filters: &[ClassFilter]) -> Vec<ClassEntry> {
        let state = self.state.read().await;
        state.classes.search(query, filters).into_iter().cloned().collect()
    }

    pub async fn toggle_class(&self, class_id: &str) -> Result<ClassEntry> {
        let entry = self.state.write().await.classes.toggle_active(class_id)?;
        tracing::info!(
            "[Classes] {} is now {}",
            entry.name,
            if entry.is_active { "active" } else { "inactive" }
        );
        Ok(entry)
    }

    pub async fn create_class(&self, request: CreateClassRequest) -> Result<ClassEntry> {
        let mut state = self.state.write().await;
        let DashboardState { groups, classes, .. } = &mut *state;
        let entry = classes.create_class(request, groups)?;
        drop(state);

        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} ({}) was added to your schedule.", entry.name, entry.time_range()),
            "Class Saved"
        );
        Ok(entry)
    }

    /// Adds one class per course in `text`. All or nothing.
    pub async fn import_schedule(&self, text: &str) -> Result<Vec<ClassEntry>> {
        let courses = parse_schedule_text(text)?;
        if courses.is_empty() {
            return Err(ClasslockError::validation("Schedule text contains no courses"));
        }

        let mut state = self.state.write().await;
        let mut staged = state.classes.clone();
        let created = courses
            .iter()
            .map(|course| staged.create_class(CreateClassRequest::from(course), &state.groups))
            .collect::<Result<Vec<_>>>()?;
        state.classes = staged;
        drop(state);

        tracing::info!(
            target: ACTIVITY_TARGET,
            detail = %format!("{} class(es) imported.", created.len()),
            "Schedule Imported"
        );
        Ok(created)
    }

    /// Renders schedule text as an `.ics` calendar starting the week of `week_of`.
    pub fn schedule_ics(&self, text: &str, week_of: NaiveDate) -> Result<String> {
        let courses = parse_schedule_text(text)?;
        tracing::debug!("[Classes] Rendering {} course(s) as iCalendar", courses.len());
        Ok(render_ics(&courses, week_of))
    }

    // ============================================================================
    // Settings
    // ============================================================================

    pub async fn settings(&self) -> Vec<SettingsSection> {
        self.state.read().await.settings.sections().to_vec()
    }

    pub async fn update_setting(
        &self,
        section_id: &str,
        setting_id: &str,
        value: SettingValue,
    ) -> Result<Setting> {
        let setting = self
            .state
            .write()
            .await
            .settings
            .update(section_id, setting_id, value)?;

        if (section_id, setting_id) == GLOBAL_BLOCKING {
            let (title, detail) = if setting.value() == SettingValue::Bool(true) {
                ("App Blocking Enabled", "All app restrictions are now active")
            } else {
                ("App Blocking Disabled", "App restrictions have been disabled")
            };
            tracing::info!(target: ACTIVITY_TARGET, detail, "{}", title);
        }
        tracing::debug!("[Settings] {}/{} = {}", section_id, setting_id, setting.value());
        Ok(setting)
    }

    pub async fn global_blocking_enabled(&self) -> bool {
        self.state.read().await.settings.global_blocking_enabled()
    }

    // ============================================================================
    // Sync
    // ============================================================================

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        DashboardSnapshot {
            catalog: state.groups.list_catalog().to_vec(),
            groups: state.groups.groups().to_vec(),
            locks: state.locks.list().to_vec(),
            classes: state.classes.list().to_vec(),
            settings: state.settings.sections().to_vec(),
        }
    }

    /// Pushes a snapshot to the sync backend. Fails with `Conflict` while a
    /// previous sync is still running.
    pub async fn sync(&self) -> Result<SyncReport> {
        let snapshot = self.snapshot().await;
        self.sync.sync(snapshot).await
    }

    pub fn is_syncing(&self) -> bool {
        self.sync.is_syncing()
    }
}
