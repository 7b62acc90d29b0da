//! Data models for the Hours Engine.
//!
//! The `models` module defines the serialisable records exchanged with
//! the outside world: user profiles with their shift windows, logged
//! entries, and the request/response shapes of the calculators.  Times
//! inside entries stay as raw strings (empty meaning "not set") until
//! they cross into the engine, where they are parsed and validated.

use crate::clock::{parse_clock_time, ClockTime};
use crate::error::TimeError;
use crate::interval::Interval;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Something that carries a raw start/end pair.
///
/// Lets the aggregation work over stored [`Entry`] records as well as
/// the lighter [`EntryTimes`] sent to the calculator endpoint.
pub trait TimedEntry {
    fn start(&self) -> &str;
    fn end(&self) -> &str;

    /// Parses the pair into an interval.  `Ok(None)` when either side
    /// is unset; an error when a set side is not a valid clock time.
    fn interval(&self) -> Result<Option<Interval>, TimeError> {
        let (start, end) = (self.start().trim(), self.end().trim());
        if start.is_empty() || end.is_empty() {
            return Ok(None);
        }
        Ok(Some(Interval::new(parse_clock_time(start)?, parse_clock_time(end)?)))
    }
}

/// The registered working hours of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWindow {
    pub work_start: ClockTime,
    pub work_end: ClockTime,
}

impl ShiftWindow {
    /// Builds a shift from raw form input.  A shift with either side
    /// left empty counts as "no shift".
    pub fn parse(work_start: &str, work_end: &str) -> Result<Option<Self>, TimeError> {
        let (work_start, work_end) = (work_start.trim(), work_end.trim());
        if work_start.is_empty() || work_end.is_empty() {
            return Ok(None);
        }
        Ok(Some(ShiftWindow {
            work_start: parse_clock_time(work_start)?,
            work_end: parse_clock_time(work_end)?,
        }))
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.work_start, self.work_end)
    }
}

/// Wire form of a shift: two raw strings, either of which may be blank.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShift {
    #[serde(default)]
    work_start: String,
    #[serde(default)]
    work_end: String,
}

/// Reads an optional shift with the same rule as [`ShiftWindow::parse`]:
/// an absent shift or one with a blank side is `None`.
fn deserialize_optional_shift<'de, D>(deserializer: D) -> Result<Option<ShiftWindow>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawShift>::deserialize(deserializer)? {
        Some(raw) => ShiftWindow::parse(&raw.work_start, &raw.work_end).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A person whose hours are being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Without a shift only the total is computed; extra stays zero.
    #[serde(default, deserialize_with = "deserialize_optional_shift")]
    pub shift: Option<ShiftWindow>,
}

/// One logged day of work.
///
/// The date and note are carried for display and export only; they
/// never influence the arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    /// A blank entry dated today, as added by the "new entry" action.
    pub fn blank() -> Self {
        Entry {
            start: String::new(),
            end: String::new(),
            date: today(),
            note: String::new(),
        }
    }
}

impl TimedEntry for Entry {
    fn start(&self) -> &str {
        &self.start
    }

    fn end(&self) -> &str {
        &self.end
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A bare start/end pair as submitted to the totals calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryTimes {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimedEntry for EntryTimes {
    fn start(&self) -> &str {
        &self.start
    }

    fn end(&self) -> &str {
        &self.end
    }
}

/// Unit in which a pause amount is typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseUnit {
    #[default]
    #[serde(rename = "min")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
}

/// Input of the totals calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalsRequest {
    pub entries: Vec<EntryTimes>,
    #[serde(default, deserialize_with = "deserialize_optional_shift")]
    pub shift: Option<ShiftWindow>,
}

/// Totals of a list of entries, both as minutes and as `HH:MM` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    pub total: String,
    pub extra: String,
    pub total_minutes: u32,
    pub extra_minutes: u32,
}

/// Input of the ad-hoc worked-time calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkedRequest {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// Raw pause amount as typed; empty means no pause.
    #[serde(default)]
    pub pause: String,
    #[serde(default)]
    pub pause_unit: PauseUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedResponse {
    pub worked: String,
}

/// Totals for one stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
    #[serde(flatten)]
    pub totals: TotalsReport,
}
