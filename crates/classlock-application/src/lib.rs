pub mod activity_layer;
pub mod dashboard;
pub mod sync_service;

pub use activity_layer::{ACTIVITY_TARGET, ActivityEvent, ActivityLayer};
pub use dashboard::{DashboardService, EditorApp, EditorCategory, EditorView};
pub use sync_service::SyncService;
