//! Class schedule domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ClasslockError, Result};

/// A class on the student's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub id: String,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Whether restrictions for this class are currently in force.
    pub is_active: bool,
    pub students: u32,
    /// App group blocked during this class, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_group_id: Option<String>,
    pub blocking_enabled: bool,
}

impl ClassEntry {
    /// "09:00 AM - 10:30 AM"
    pub fn time_range(&self) -> String {
        format!("{} - {}", format_clock_time(self.start), format_clock_time(self.end))
    }
}

/// Status filters offered next to the class search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassFilter {
    Active,
    Inactive,
}

impl ClassFilter {
    pub fn matches(self, entry: &ClassEntry) -> bool {
        match self {
            ClassFilter::Active => entry.is_active,
            ClassFilter::Inactive => !entry.is_active,
        }
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassFilter::Active => write!(f, "active"),
            ClassFilter::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for ClassFilter {
    type Err = ClasslockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ClassFilter::Active),
            "inactive" => Ok(ClassFilter::Inactive),
            other => Err(ClasslockError::validation(format!(
                "Unknown class filter: '{}'",
                other
            ))),
        }
    }
}

/// Parses a wall-clock time as typed in the class form or read from a schedule.
///
/// Accepts 24-hour `HH:MM` and 12-hour `h:mm AM` (with or without the space).
pub fn parse_clock_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    ["%H:%M", "%I:%M %p", "%I:%M%p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ClasslockError::validation(format!("Invalid time: '{}'", trimmed)))
}

/// Formats a time the way the dashboard shows it ("02:00 PM").
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_time_formats() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let half_two = NaiveTime::from_hms_opt(14, 30, 0).unwrap();

        assert_eq!(parse_clock_time("09:00").unwrap(), nine);
        assert_eq!(parse_clock_time("9:00 AM").unwrap(), nine);
        assert_eq!(parse_clock_time("2:30 PM").unwrap(), half_two);
        assert_eq!(parse_clock_time(" 14:30 ").unwrap(), half_two);
    }

    #[test]
    fn test_parse_clock_time_rejects_garbage() {
        assert!(parse_clock_time("noon").unwrap_err().is_validation());
        assert!(parse_clock_time("").unwrap_err().is_validation());
    }

    #[test]
    fn test_class_filter_from_str() {
        assert_eq!("Active".parse::<ClassFilter>().unwrap(), ClassFilter::Active);
        assert_eq!("inactive".parse::<ClassFilter>().unwrap(), ClassFilter::Inactive);
        assert!("apps".parse::<ClassFilter>().is_err());
    }

    #[test]
    fn test_time_range_display() {
        let entry = ClassEntry {
            id: "1".to_string(),
            name: "Physics Lab".to_string(),
            start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            is_active: false,
            students: 18,
            app_group_id: None,
            blocking_enabled: true,
        };
        assert_eq!(entry.time_range(), "11:00 AM - 12:30 PM");
    }
}
