//! Weekly schedule text import and iCalendar export.
//!
//! The dashboard's "Upload Schedule" flow produces plain text, one course per
//! line:
//!
//! ```text
//! Math 101: Mon, Wed, Fri 9:00 AM - 10:30 AM
//! Physics 202: Tue, Thu 11:00 AM - 12:30 PM
//! ```
//!
//! The text is parsed into [`ScheduledCourse`] values, which can be turned into
//! classes or rendered as an `.ics` calendar with one weekly event per course.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::parse_clock_time;
use crate::error::{ClasslockError, Result};

static COURSE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>[^:]+):\s*(?P<days>[A-Za-z]{3}(?:\s*,\s*[A-Za-z]{3})*)\s+(?P<start>\d{1,2}:\d{2}\s*[AaPp][Mm])\s*-\s*(?P<end>\d{1,2}:\d{2}\s*[AaPp][Mm])$",
    )
    .expect("course line pattern is valid")
});

const PRODID: &str = "-//Classlock//Schedule Export//EN";

/// One course from an imported weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCourse {
    pub name: String,
    /// Meeting days, without duplicates, in the order they were written.
    pub days: Vec<Weekday>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parses schedule text, one course per non-blank line.
///
/// Fails with `Validation` naming the first malformed line (1-based).
pub fn parse_schedule_text(text: &str) -> Result<Vec<ScheduledCourse>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_course_line(line.trim()).map_err(|e| {
                ClasslockError::validation(format!("Line {}: {}", index + 1, describe(&e)))
            })
        })
        .collect()
}

fn describe(err: &ClasslockError) -> String {
    match err {
        ClasslockError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

fn parse_course_line(line: &str) -> Result<ScheduledCourse> {
    let captures = COURSE_LINE.captures(line).ok_or_else(|| {
        ClasslockError::validation(format!(
            "expected '<name>: <Day>, <Day> <h:mm AM> - <h:mm PM>', got '{}'",
            line
        ))
    })?;

    let name = captures["name"].trim().to_string();
    if name.is_empty() {
        return Err(ClasslockError::validation("course name is empty"));
    }

    let mut days = Vec::new();
    for token in captures["days"].split(',') {
        let day = token
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ClasslockError::validation(format!("unknown day '{}'", token.trim())))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }

    let start = parse_clock_time(&captures["start"])?;
    let end = parse_clock_time(&captures["end"])?;
    if end <= start {
        return Err(ClasslockError::validation(format!(
            "'{}' must end after it starts",
            name
        )));
    }

    Ok(ScheduledCourse {
        name,
        days,
        start,
        end,
    })
}

/// Renders courses as an iCalendar document with one weekly event each.
///
/// Each event starts on the course's first meeting day on or after `week_of`.
/// Times are floating local times. Lines are CRLF-terminated and folded at
/// 75 octets.
pub fn render_ics(courses: &[ScheduledCourse], week_of: NaiveDate) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
    ];

    for (index, course) in courses.iter().enumerate() {
        let Some(first_day) = first_meeting_on_or_after(&course.days, week_of) else {
            continue;
        };
        let by_day: Vec<&str> = course.days.iter().map(|d| ics_day_code(*d)).collect();

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@classlock", slug(&course.name), index + 1));
        lines.push(format!("SUMMARY:{}", escape_text(&course.name)));
        lines.push(format!("DTSTART:{}", ics_datetime(first_day, course.start)));
        lines.push(format!("DTEND:{}", ics_datetime(first_day, course.end)));
        lines.push(format!("RRULE:FREQ=WEEKLY;BYDAY={}", by_day.join(",")));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    lines.iter().map(|line| fold_line(line)).collect()
}

const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line into CRLF-terminated chunks of at most 75 octets,
/// continuation chunks starting with a space. Never splits a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut width = 0;
    for ch in line.chars() {
        if width + ch.len_utf8() > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += ch.len_utf8();
    }
    out.push_str("\r\n");
    out
}

fn first_meeting_on_or_after(days: &[Weekday], from: NaiveDate) -> Option<NaiveDate> {
    (0..7u64)
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .find(|date| days.contains(&date.weekday()))
}

fn ics_datetime(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%Y%m%dT%H%M%S").to_string()
}

fn ics_day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

// RFC 5545 TEXT escaping
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            // CRLF and a bare CR are both one line break
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            other => out.push(other),
        }
    }
    out
}

fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    slug.trim_matches('-').to_string()
}
