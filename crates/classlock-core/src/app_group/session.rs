//! Staged membership edits for a single app group.

use std::collections::BTreeSet;

use serde::Serialize;

/// Transient edit state for one group's membership.
///
/// A session is a value: it holds its own copy of the staged ids, so nothing
/// done to it reaches the group until `AppGroupStore::commit_edit_session`.
/// Sessions are only created by the store, which guarantees every staged id
/// exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSession {
    target_group_id: String,
    staged_member_ids: BTreeSet<String>,
    search_query: String,
}

impl SelectionSession {
    pub(crate) fn new(target_group_id: String, staged_member_ids: BTreeSet<String>) -> Self {
        Self {
            target_group_id,
            staged_member_ids,
            search_query: String::new(),
        }
    }

    pub fn target_group_id(&self) -> &str {
        &self.target_group_id
    }

    pub fn staged_member_ids(&self) -> &BTreeSet<String> {
        &self.staged_member_ids
    }

    pub fn is_staged(&self, app_id: &str) -> bool {
        self.staged_member_ids.contains(app_id)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Returns the session with a new display filter. Staged ids are untouched.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub(crate) fn toggled(&self, app_id: &str) -> Self {
        let mut next = self.clone();
        if !next.staged_member_ids.remove(app_id) {
            next.staged_member_ids.insert(app_id.to_string());
        }
        next
    }
}
