//! Class schedule domain module.
//!
//! - `model`: `ClassEntry`, `ClassFilter` and clock-time helpers
//! - `request`: `CreateClassRequest`, the raw input of the class form
//! - `store`: `ClassSchedule`, owner of the timetable
//! - `import`: schedule text parsing and `.ics` rendering

pub mod import;
mod model;
mod request;
mod store;

pub use import::{ScheduledCourse, parse_schedule_text, render_ics};
pub use model::{ClassEntry, ClassFilter, format_clock_time, parse_clock_time};
pub use request::CreateClassRequest;
pub use store::ClassSchedule;
