//! App lock domain models.

use serde::{Deserialize, Serialize};

use crate::error::{ClasslockError, Result};

/// A single lockable app on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLockItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub is_locked: bool,
}

impl AppLockItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        is_locked: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            is_locked,
        }
    }
}

/// The set of lock switches, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLockBoard {
    items: Vec<AppLockItem>,
}

impl AppLockBoard {
    pub fn new(items: Vec<AppLockItem>) -> Self {
        Self { items }
    }

    pub fn list(&self) -> &[AppLockItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&AppLockItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flips the lock on one app and returns its new state.
    pub fn toggle_lock(&mut self, id: &str) -> Result<AppLockItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ClasslockError::not_found("app lock", id))?;
        item.is_locked = !item.is_locked;
        Ok(item.clone())
    }

    /// Number of apps currently locked.
    pub fn locked_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_locked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> AppLockBoard {
        AppLockBoard::new(vec![
            AppLockItem::new("1", "Instagram", "Social Media", true),
            AppLockItem::new("3", "YouTube", "Entertainment", false),
        ])
    }

    #[test]
    fn test_toggle_lock_flips_state() {
        let mut board = board();

        let item = board.toggle_lock("3").unwrap();
        assert!(item.is_locked);
        assert_eq!(board.locked_count(), 2);

        let item = board.toggle_lock("3").unwrap();
        assert!(!item.is_locked);
        assert_eq!(board.locked_count(), 1);
    }

    #[test]
    fn test_toggle_unknown_app() {
        let mut board = board();
        let before = board.clone();

        let err = board.toggle_lock("missing").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(board, before);
    }
}
