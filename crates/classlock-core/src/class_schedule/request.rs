//! Class creation request model.

use serde::{Deserialize, Serialize};

use super::import::ScheduledCourse;

/// Request to add a class to the schedule.
///
/// Mirrors the "Create Class Schedule" form: times arrive as the raw strings
/// the user typed and are validated by `ClassSchedule::create_class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// App group to block during the class (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_group_id: Option<String>,
    #[serde(default = "default_blocking_enabled")]
    pub blocking_enabled: bool,
}

fn default_blocking_enabled() -> bool {
    true
}

impl CreateClassRequest {
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            app_group_id: None,
            blocking_enabled: default_blocking_enabled(),
        }
    }

    pub fn with_app_group(mut self, group_id: impl Into<String>) -> Self {
        self.app_group_id = Some(group_id.into());
        self
    }
}

impl From<&ScheduledCourse> for CreateClassRequest {
    fn from(course: &ScheduledCourse) -> Self {
        Self::new(
            course.name.clone(),
            course.start.format("%H:%M").to_string(),
            course.end.format("%H:%M").to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_defaults_to_enabled_when_deserialized() {
        let request: CreateClassRequest =
            serde_json::from_str(r#"{"name":"Chemistry","startTime":"08:00","endTime":"09:00"}"#)
                .unwrap();
        assert!(request.blocking_enabled);
        assert_eq!(request.app_group_id, None);
    }
}
