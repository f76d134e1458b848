//! Domain core of Classlock: the app catalog, app groups and their staged
//! membership editor, per-app locks, the class schedule and settings.
//!
//! Everything here is synchronous and in-memory. Async plumbing lives in
//! `classlock-application`, file access in `classlock-infrastructure`.

pub mod app_group;
pub mod app_lock;
pub mod class_schedule;
pub mod config;
pub mod error;
pub mod seed;
pub mod settings;
pub mod sync;

// Re-export common error type
pub use error::ClasslockError;
