//! App group domain module.
//!
//! App groups are named collections of catalog apps that a student restricts
//! together (e.g., "Social Media" during lectures). Membership is edited
//! through a [`SelectionSession`]: the session stages a copy of the current
//! members, is toggled app by app, and is then committed as a single
//! replace or simply dropped.
//!
//! # Module Structure
//!
//! - `model`: `App`, `Catalog`, `AppGroup` and category grouping
//! - `session`: `SelectionSession`, the staged edit value
//! - `store`: `AppGroupStore`, owner of the catalog and groups

mod model;
mod session;
mod store;

pub use model::{App, AppGroup, Catalog, CategoryGroup, group_by_category};
pub use session::SelectionSession;
pub use store::AppGroupStore;
