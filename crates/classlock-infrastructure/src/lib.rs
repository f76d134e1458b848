pub mod config_service;
pub mod paths;
pub mod simulated_sync_backend;

pub use crate::config_service::ConfigService;
pub use crate::paths::ClasslockPaths;
pub use crate::simulated_sync_backend::SimulatedSyncBackend;
