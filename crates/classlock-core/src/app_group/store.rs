//! The app group store: catalog, groups and membership edit sessions.

use uuid::Uuid;

use super::model::{App, AppGroup, Catalog};
use super::session::SelectionSession;
use crate::error::{ClasslockError, Result};

const ENTITY: &str = "app group";

/// Owns the app catalog and the user-defined app groups.
///
/// `AppGroupStore` is the single writer of group membership. Groups are kept
/// in creation order. Every operation either applies completely or returns an
/// error without touching the store.
#[derive(Debug, Clone)]
pub struct AppGroupStore {
    catalog: Catalog,
    groups: Vec<AppGroup>,
}

impl AppGroupStore {
    /// Creates a store with no groups.
    ///
    /// # Examples
    ///
    /// ```
    /// use classlock_core::app_group::{App, AppGroupStore, Catalog};
    ///
    /// let catalog = Catalog::new(vec![App::new("1", "Instagram", "Social Media")]).unwrap();
    /// let store = AppGroupStore::new(catalog);
    /// assert!(store.groups().is_empty());
    /// ```
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            groups: Vec::new(),
        }
    }

    /// Creates a store pre-populated with named groups.
    ///
    /// Each seed goes through `create_group` and a committed edit session, so
    /// seeds obey the same rules as user edits: a blank name or an app id
    /// missing from the catalog fails the whole construction.
    pub fn with_groups<I, S>(catalog: Catalog, seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: AsRef<str>,
    {
        let mut store = Self::new(catalog);
        for (name, members) in seeds {
            let group = store.create_group(name.as_ref())?;
            let mut session = store.begin_edit_session(&group.id)?;
            for app_id in &members {
                if !session.is_staged(app_id) {
                    session = store.toggle_staged(&session, app_id)?;
                }
            }
            store.commit_edit_session(&session)?;
        }
        Ok(store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The full installed-app catalog in insertion order.
    pub fn list_catalog(&self) -> &[App] {
        self.catalog.apps()
    }

    /// Apps whose name or category contains `query`, ignoring case.
    pub fn filter_catalog(&self, query: &str) -> Vec<&App> {
        self.catalog.filter(query)
    }

    /// All groups in creation order.
    pub fn groups(&self) -> &[AppGroup] {
        &self.groups
    }

    pub fn get_group(&self, group_id: &str) -> Option<&AppGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Resolves a group's member ids to catalog entries.
    pub fn group_apps(&self, group_id: &str) -> Result<Vec<&App>> {
        let group = self.require_group(group_id)?;
        Ok(group
            .members
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect())
    }

    /// Creates an empty group named `name` and appends it after existing groups.
    ///
    /// The name is stored trimmed. Fails with `Validation` when the name is
    /// empty or whitespace-only.
    pub fn create_group(&mut self, name: &str) -> Result<AppGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClasslockError::validation("Group name must not be empty"));
        }

        let group = AppGroup {
            id: self.allocate_id(),
            name: name.to_string(),
            members: Vec::new(),
        };
        self.groups.push(group.clone());
        Ok(group)
    }

    /// Opens an edit session seeded with a copy of the group's members.
    pub fn begin_edit_session(&self, group_id: &str) -> Result<SelectionSession> {
        let group = self.require_group(group_id)?;
        Ok(SelectionSession::new(
            group.id.clone(),
            group.members.iter().cloned().collect(),
        ))
    }

    /// Returns `session` with `app_id` added if absent, or removed if present.
    ///
    /// Fails with `Validation` when the catalog has no such app. The store and
    /// the input session are not modified.
    pub fn toggle_staged(&self, session: &SelectionSession, app_id: &str) -> Result<SelectionSession> {
        if !self.catalog.contains(app_id) {
            return Err(ClasslockError::validation(format!(
                "Unknown app id: '{}'",
                app_id
            )));
        }
        Ok(session.toggled(app_id))
    }

    /// Replaces the target group's members with the session's staged ids.
    ///
    /// This is an overwrite, not a merge. Members are stored in catalog order.
    /// Fails with `NotFound` when the group was deleted after the session
    /// was opened.
    pub fn commit_edit_session(&mut self, session: &SelectionSession) -> Result<AppGroup> {
        let members: Vec<String> = self
            .catalog
            .apps()
            .iter()
            .filter(|app| session.is_staged(&app.id))
            .map(|app| app.id.clone())
            .collect();

        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == session.target_group_id())
            .ok_or_else(|| ClasslockError::not_found(ENTITY, session.target_group_id()))?;
        group.members = members;
        Ok(group.clone())
    }

    /// Drops a session without applying it.
    pub fn discard_edit_session(&self, session: SelectionSession) {
        drop(session);
    }

    /// Removes a group and returns it.
    ///
    /// Sessions opened for this group will fail to commit afterwards.
    pub fn delete_group(&mut self, group_id: &str) -> Result<AppGroup> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| ClasslockError::not_found(ENTITY, group_id))?;
        Ok(self.groups.remove(index))
    }

    fn require_group(&self, group_id: &str) -> Result<&AppGroup> {
        self.get_group(group_id)
            .ok_or_else(|| ClasslockError::not_found(ENTITY, group_id))
    }

    fn allocate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get_group(&id).is_none() {
                return id;
            }
        }
    }
}
