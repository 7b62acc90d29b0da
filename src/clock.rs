//! Wall-clock arithmetic.
//!
//! A [`ClockTime`] is a minute of the day, `0..1440`.  Its external
//! form is a zero-padded `HH:MM` string.  Durations are plain minute
//! counts and are formatted with [`minutes_to_duration_string`], whose
//! hour field is not wrapped at 24.

use crate::error::TimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// Builds a clock time from a minute-of-day, or `None` when it is
    /// outside `0..1440`.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(ClockTime(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(ClockTime(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

/// Parses a strict `HH:MM` string.
///
/// Both fields must be exactly two ASCII digits; the hour must be in
/// `00..=23` and the minute in `00..=59`.  The empty string means "no
/// time set" and is not accepted here: callers check for it first.
pub fn parse_clock_time(s: &str) -> Result<ClockTime, TimeError> {
    let malformed = || TimeError::MalformedTime(s.to_string());
    let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
    let hour = two_digits(hours).ok_or_else(malformed)?;
    let minute = two_digits(minutes).ok_or_else(malformed)?;
    ClockTime::from_hm(hour, minute).ok_or_else(malformed)
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

/// Formats a clock time as `HH:MM` (always five characters).
pub fn format_clock_time(t: ClockTime) -> String {
    format!("{:02}:{:02}", t.0 / 60, t.0 % 60)
}

/// Formats a duration in minutes as `HH:MM`, letting the hours grow
/// past 24 for aggregate totals.
pub fn minutes_to_duration_string(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_clock_time(&value)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        format_clock_time(t)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock_time(*self))
    }
}
