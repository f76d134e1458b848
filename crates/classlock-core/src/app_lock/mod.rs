//! Per-app lock switches shown on the dashboard.
//!
//! A lock item is independent of the app catalog: the board tracks whichever
//! apps the student pinned to the dashboard and whether each one is locked.

mod model;

pub use model::{AppLockBoard, AppLockItem};
