use uuid::Uuid;

use super::model::{ClassEntry, ClassFilter, parse_clock_time};
use super::request::CreateClassRequest;
use crate::app_group::AppGroupStore;
use crate::error::{ClasslockError, Result};

const ENTITY: &str = "class";

/// The student's timetable, in display order.
#[derive(Debug, Clone, Default)]
pub struct ClassSchedule {
    classes: Vec<ClassEntry>,
}

impl ClassSchedule {
    pub fn new(classes: Vec<ClassEntry>) -> Self {
        Self { classes }
    }

    pub fn list(&self) -> &[ClassEntry] {
        &self.classes
    }

    pub fn get(&self, class_id: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    /// Validates `request` and appends a new, inactive class.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank name, an unparsable time, or an end time
    ///   that is not after the start time
    /// - `NotFound` when `app_group_id` names a group `groups` does not have
    pub fn create_class(
        &mut self,
        request: CreateClassRequest,
        groups: &AppGroupStore,
    ) -> Result<ClassEntry> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ClasslockError::validation("Class name must not be empty"));
        }

        let start = parse_clock_time(&request.start_time)?;
        let end = parse_clock_time(&request.end_time)?;
        if end <= start {
            return Err(ClasslockError::validation(format!(
                "Class '{}' must end after it starts",
                name
            )));
        }

        let app_group_id = match request.app_group_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(group_id) => {
                if groups.get_group(group_id).is_none() {
                    return Err(ClasslockError::not_found("app group", group_id));
                }
                Some(group_id.to_string())
            }
        };

        let entry = ClassEntry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            start,
            end,
            is_active: false,
            students: 0,
            app_group_id,
            blocking_enabled: request.blocking_enabled,
        };
        self.classes.push(entry.clone());
        Ok(entry)
    }

    /// Flips a class between active and inactive and returns the new state.
    pub fn toggle_active(&mut self, class_id: &str) -> Result<ClassEntry> {
        let entry = self
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or_else(|| ClasslockError::not_found(ENTITY, class_id))?;
        entry.is_active = !entry.is_active;
        Ok(entry.clone())
    }

    /// Classes whose name contains `query` (ignoring case) and that pass the
    /// status filters.
    ///
    /// Selecting both `Active` and `Inactive`, or neither, applies no status
    /// restriction.
    pub fn search(&self, query: &str, filters: &[ClassFilter]) -> Vec<&ClassEntry> {
        let needle = query.trim().to_lowercase();
        let status = match (
            filters.contains(&ClassFilter::Active),
            filters.contains(&ClassFilter::Inactive),
        ) {
            (true, false) => Some(ClassFilter::Active),
            (false, true) => Some(ClassFilter::Inactive),
            _ => None,
        };

        self.classes
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .filter(|c| status.is_none_or(|f| f.matches(c)))
            .collect()
    }

    /// Detaches every class from a deleted app group. Returns how many changed.
    pub fn clear_group_references(&mut self, group_id: &str) -> usize {
        let mut cleared = 0;
        for entry in &mut self.classes {
            if entry.app_group_id.as_deref() == Some(group_id) {
                entry.app_group_id = None;
                cleared += 1;
            }
        }
        cleared
    }
}
