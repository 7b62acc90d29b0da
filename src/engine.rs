//! Hours computation engine.
//!
//! The `engine` module turns worked intervals into totals.  The core
//! functions ([`compute_totals`], [`compute_ad_hoc_duration`]) work on
//! already-validated [`Interval`]s and cannot fail.  The boundary
//! functions ([`summarize_entries`], [`calculate_worked`],
//! [`summarize_store`]) accept the raw strings typed by a user, reject
//! malformed input with a [`TimeError`] and format the results as
//! `HH:MM` text.

use crate::clock::{minutes_to_duration_string, parse_clock_time};
use crate::error::TimeError;
use crate::interval::{duration, overlap_minutes, Interval};
use crate::models::{
    Entry, PauseUnit, ShiftWindow, TimedEntry, TotalsReport, UserProfile, UserSummary,
    WorkedRequest,
};
use crate::store::Store;
use tracing::debug;

/// Worked and extra minutes across a list of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_minutes: u32,
    pub extra_minutes: u32,
}

/// Minutes of `entry` that fall outside `shift`, never more than the
/// entry's own duration.
pub fn extra_minutes(entry: &Interval, shift: &Interval) -> u32 {
    duration(entry).saturating_sub(overlap_minutes(entry, shift))
}

/// Sums durations and, when a shift is given, the time worked outside it.
///
/// `None` items are entries with a missing start or end; they
/// contribute nothing.
pub fn compute_totals(entries: &[Option<Interval>], shift: Option<&Interval>) -> Totals {
    entries
        .iter()
        .flatten()
        .fold(Totals::default(), |acc, entry| Totals {
            total_minutes: acc.total_minutes + duration(entry),
            extra_minutes: acc.extra_minutes + shift.map_or(0, |s| extra_minutes(entry, s)),
        })
}

/// Duration between two times minus a pause, floored at zero.
pub fn compute_ad_hoc_duration(interval: &Interval, pause_minutes: u32) -> u32 {
    duration(interval).saturating_sub(pause_minutes)
}

/// Converts a typed pause amount to whole minutes.
///
/// Empty input means no pause.  Anything that is not a finite,
/// non-negative number is rejected rather than clamped.  Hour amounts
/// may be fractional and are rounded to the nearest minute.
pub fn parse_pause(raw: &str, unit: PauseUnit) -> Result<u32, TimeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let invalid = || TimeError::InvalidPause(raw.to_string());
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    let minutes = match unit {
        PauseUnit::Minutes => value,
        PauseUnit::Hours => value * 60.0,
    }
    .round();
    if minutes > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(minutes as u32)
}

/// Parses and totals a list of raw entries against an optional shift.
pub fn summarize_entries<E: TimedEntry>(
    entries: &[E],
    shift: Option<&ShiftWindow>,
) -> Result<TotalsReport, TimeError> {
    let intervals = entries
        .iter()
        .map(TimedEntry::interval)
        .collect::<Result<Vec<_>, _>>()?;
    let shift = shift.map(ShiftWindow::interval);
    let totals = compute_totals(&intervals, shift.as_ref());
    debug!(
        entries = intervals.len(),
        skipped = intervals.iter().filter(|i| i.is_none()).count(),
        total_minutes = totals.total_minutes,
        extra_minutes = totals.extra_minutes,
        "computed totals"
    );
    Ok(report(totals))
}

/// The ad-hoc calculator: time worked between `start` and `end` after
/// the pause is deducted.
///
/// With either time left empty the result is `"00:00"`.
pub fn calculate_worked(request: &WorkedRequest) -> Result<String, TimeError> {
    let (start, end) = (request.start.trim(), request.end.trim());
    if start.is_empty() || end.is_empty() {
        return Ok(minutes_to_duration_string(0));
    }
    let interval = Interval::new(parse_clock_time(start)?, parse_clock_time(end)?);
    let pause = parse_pause(&request.pause, request.pause_unit)?;
    let worked = compute_ad_hoc_duration(&interval, pause);
    debug!(start = %interval.start, end = %interval.end, pause, worked, "computed worked time");
    Ok(minutes_to_duration_string(worked))
}

/// Totals of one user's timesheet against that user's shift.
pub fn summarize_user(profile: &UserProfile, entries: &[Entry]) -> Result<UserSummary, TimeError> {
    Ok(UserSummary {
        user_id: profile.id.clone(),
        name: profile.name.clone(),
        totals: summarize_entries(entries, profile.shift.as_ref())?,
    })
}

/// Summaries for every registered user, in registration order.
pub fn summarize_store(store: &Store) -> Result<Vec<UserSummary>, TimeError> {
    store
        .users()
        .iter()
        .map(|profile| summarize_user(profile, store.entries(&profile.id)?))
        .collect()
}

fn report(totals: Totals) -> TotalsReport {
    TotalsReport {
        total: minutes_to_duration_string(totals.total_minutes),
        extra: minutes_to_duration_string(totals.extra_minutes),
        total_minutes: totals.total_minutes,
        extra_minutes: totals.extra_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryTimes;

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(parse_clock_time(start).unwrap(), parse_clock_time(end).unwrap())
    }

    fn times(start: &str, end: &str) -> EntryTimes {
        EntryTimes { start: start.into(), end: end.into() }
    }

    #[test]
    fn test_compute_totals_with_shift() {
        let entries = [Some(iv("09:00", "17:00")), Some(iv("18:00", "20:00"))];
        let shift = iv("09:00", "17:00");
        let totals = compute_totals(&entries, Some(&shift));
        assert_eq!(totals, Totals { total_minutes: 600, extra_minutes: 120 });
        assert_eq!(compute_totals(&entries, Some(&shift)), totals);
    }

    #[test]
    fn test_compute_totals_without_shift_has_no_extra() {
        let entries = [Some(iv("22:00", "02:00")), None, Some(iv("08:00", "12:00"))];
        let totals = compute_totals(&entries, None);
        assert_eq!(totals, Totals { total_minutes: 480, extra_minutes: 0 });
    }

    #[test]
    fn test_night_shift_extra() {
        let shift = iv("22:00", "06:00");
        assert_eq!(extra_minutes(&iv("23:00", "01:00"), &shift), 0);
        assert_eq!(extra_minutes(&iv("20:00", "07:00"), &shift), 180);
        // A full day against an eight hour shift leaves sixteen extra hours.
        assert_eq!(extra_minutes(&iv("12:00", "12:00"), &shift), 960);
    }

    #[test]
    fn test_extra_never_exceeds_duration() {
        let shifts = [iv("09:00", "17:00"), iv("22:00", "06:00"), iv("00:00", "00:00")];
        for start in (0..1440).step_by(45) {
            for end in (0..1440).step_by(70) {
                let entry = Interval::new(
                    crate::clock::ClockTime::from_minutes(start).unwrap(),
                    crate::clock::ClockTime::from_minutes(end).unwrap(),
                );
                for shift in &shifts {
                    assert!(extra_minutes(&entry, shift) <= duration(&entry));
                }
            }
        }
    }

    #[test]
    fn test_ad_hoc_duration_clamps_at_zero() {
        assert_eq!(compute_ad_hoc_duration(&iv("09:00", "17:30"), 60), 450);
        assert_eq!(compute_ad_hoc_duration(&iv("09:00", "09:30"), 60), 0);
        assert_eq!(compute_ad_hoc_duration(&iv("22:00", "02:00"), 30), 210);
    }

    #[test]
    fn test_parse_pause() {
        assert_eq!(parse_pause("", PauseUnit::Minutes), Ok(0));
        assert_eq!(parse_pause("45", PauseUnit::Minutes), Ok(45));
        assert_eq!(parse_pause("1", PauseUnit::Hours), Ok(60));
        assert_eq!(parse_pause("1.5", PauseUnit::Hours), Ok(90));
        for bad in ["-5", "abc", "NaN", "inf", "1e300"] {
            assert_eq!(
                parse_pause(bad, PauseUnit::Minutes),
                Err(TimeError::InvalidPause(bad.into())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_summarize_entries_formats_and_skips_unset() {
        let entries = [times("09:00", "17:00"), times("", ""), times("18:00", "20:00")];
        let shift = ShiftWindow::parse("09:00", "17:00").unwrap();
        let report = summarize_entries(&entries, shift.as_ref()).unwrap();
        assert_eq!(report.total, "10:00");
        assert_eq!(report.extra, "02:00");
        assert_eq!(report.total_minutes, 600);
        assert_eq!(report.extra_minutes, 120);
    }

    #[test]
    fn test_summarize_entries_rejects_malformed_time() {
        let entries = [times("09:00", "17:00"), times("9:00", "10:00")];
        assert_eq!(
            summarize_entries(&entries, None),
            Err(TimeError::MalformedTime("9:00".into()))
        );
    }

    #[test]
    fn test_summarize_entries_total_exceeds_a_day() {
        let entries = [times("08:00", "20:00"), times("08:00", "21:00")];
        assert_eq!(summarize_entries(&entries, None).unwrap().total, "25:00");
    }

    #[test]
    fn test_calculate_worked() {
        let request = WorkedRequest {
            start: "09:00".into(),
            end: "17:30".into(),
            pause: "60".into(),
            pause_unit: PauseUnit::Minutes,
        };
        assert_eq!(calculate_worked(&request).unwrap(), "07:30");

        let request = WorkedRequest { pause: "1".into(), pause_unit: PauseUnit::Hours, ..request };
        assert_eq!(calculate_worked(&request).unwrap(), "07:30");
    }

    #[test]
    fn test_calculate_worked_with_missing_time() {
        let request = WorkedRequest { start: "09:00".into(), ..Default::default() };
        assert_eq!(calculate_worked(&request).unwrap(), "00:00");
    }

    #[test]
    fn test_calculate_worked_rejects_negative_pause() {
        let request = WorkedRequest {
            start: "09:00".into(),
            end: "17:00".into(),
            pause: "-10".into(),
            pause_unit: PauseUnit::Minutes,
        };
        assert_eq!(calculate_worked(&request), Err(TimeError::InvalidPause("-10".into())));
    }
}
