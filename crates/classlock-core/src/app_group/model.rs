//! App catalog and app group domain models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ClasslockError, Result};

/// An entry in the installed-app catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct App {
    /// Stable identifier, unique within the catalog.
    pub id: String,
    /// Display name (e.g., "Instagram").
    pub name: String,
    /// Category label (e.g., "Social Media", "Games").
    pub category: String,
}

impl App {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }

    /// Case-insensitive substring match against the name or the category.
    ///
    /// `needle` must already be lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// The fixed list of installed apps, in insertion order.
///
/// The catalog is built once at startup and never changes afterwards, so any
/// app id that was valid when staged is still valid at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    apps: Vec<App>,
}

impl Catalog {
    /// Builds a catalog, rejecting blank ids or names and duplicate ids.
    pub fn new(apps: Vec<App>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(apps.len());
        for app in &apps {
            if app.id.trim().is_empty() {
                return Err(ClasslockError::validation("App id must not be empty"));
            }
            if app.name.trim().is_empty() {
                return Err(ClasslockError::validation(format!(
                    "App '{}' has an empty name",
                    app.id
                )));
            }
            if !seen.insert(app.id.as_str()) {
                return Err(ClasslockError::validation(format!(
                    "Duplicate app id in catalog: '{}'",
                    app.id
                )));
            }
        }
        Ok(Self { apps })
    }

    /// All apps in catalog order.
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    pub fn get(&self, app_id: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.id == app_id)
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.get(app_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Returns the apps whose name or category contains `query`, ignoring case.
    ///
    /// An empty query returns the whole catalog. Order is catalog order.
    pub fn filter(&self, query: &str) -> Vec<&App> {
        let needle = query.to_lowercase();
        self.apps
            .iter()
            .filter(|app| needle.is_empty() || app.matches_lowercase(&needle))
            .collect()
    }
}

/// A user-defined named collection of apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppGroup {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// Non-empty display name.
    pub name: String,
    /// Member app ids, without duplicates, in catalog order.
    pub members: Vec<String>,
}

impl AppGroup {
    pub fn contains_app(&self, app_id: &str) -> bool {
        self.members.iter().any(|id| id == app_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Apps sharing one category label, as shown under a heading in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub apps: Vec<&'a App>,
}

/// Partitions `apps` by category.
///
/// Categories appear in the order they are first encountered; apps keep their
/// relative order within each category.
pub fn group_by_category<'a>(apps: &[&'a App]) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for &app in apps {
        match groups.iter_mut().find(|g| g.category == app.category) {
            Some(group) => group.apps.push(app),
            None => groups.push(CategoryGroup {
                category: &app.category,
                apps: vec![app],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            App::new("1", "Instagram", "Social Media"),
            App::new("4", "Minecraft", "Games"),
            App::new("6", "YouTube", "Entertainment"),
            App::new("2", "TikTok", "Social Media"),
        ])
        .unwrap()
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            App::new("1", "Instagram", "Social Media"),
            App::new("1", "TikTok", "Social Media"),
        ])
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_catalog_rejects_blank_name() {
        let err = Catalog::new(vec![App::new("1", "  ", "Games")]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_filter_matches_name_and_category_case_insensitively() {
        let catalog = sample_catalog();

        let names: Vec<&str> = catalog.filter("SOCIAL").into_iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Instagram", "TikTok"]);

        let names: Vec<&str> = catalog.filter("craft").into_iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Minecraft"]);

        assert!(catalog.filter("nothing matches").is_empty());
    }

    #[test]
    fn test_empty_filter_returns_catalog_order() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog.filter("").into_iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "6", "2"]);
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let catalog = sample_catalog();
        let groups = group_by_category(&catalog.filter(""));

        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Social Media", "Games", "Entertainment"]);

        let social: Vec<&str> = groups[0].apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(social, vec!["Instagram", "TikTok"]);
    }

    #[test]
    fn test_group_by_category_of_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }
}
