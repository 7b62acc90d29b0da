//! Intervals on the circular 24 hour clock.
//!
//! An [`Interval`] whose end is not after its start wraps past
//! midnight.  Overlap between two intervals is computed by cutting each
//! one at midnight into at most two linear ranges and intersecting
//! every pair of ranges.

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A span of time between two wall-clock times.
///
/// `end < start` covers `[start, 1440) ∪ [0, end)`.  `start == end`
/// covers the whole day (1440 minutes), never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Interval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Interval { start, end }
    }

    pub fn wraps(&self) -> bool {
        self.end <= self.start
    }
}

/// Length of the interval in minutes, `1..=1440`.
pub fn duration(interval: &Interval) -> u32 {
    let (start, end) = (interval.start.minutes(), interval.end.minutes());
    if end > start {
        end - start
    } else {
        (MINUTES_PER_DAY - start) + end
    }
}

/// Cuts the interval at midnight into linear, half-open minute ranges.
///
/// A wrapping interval yields `[start, 1440)` followed by `[0, end)`;
/// the second range is omitted when `end` is midnight.
pub fn split_at_midnight(interval: &Interval) -> Vec<Range<u32>> {
    let (start, end) = (interval.start.minutes(), interval.end.minutes());
    if start < end {
        return vec![start..end];
    }
    let mut ranges = vec![start..MINUTES_PER_DAY];
    if end > 0 {
        ranges.push(0..end);
    }
    ranges
}

/// Minutes during which both intervals are active.
pub fn overlap_minutes(a: &Interval, b: &Interval) -> u32 {
    let b_ranges = split_at_midnight(b);
    split_at_midnight(a)
        .iter()
        .flat_map(|ra| b_ranges.iter().map(move |rb| intersection(ra, rb)))
        .sum()
}

fn intersection(a: &Range<u32>, b: &Range<u32>) -> u32 {
    a.end.min(b.end).saturating_sub(a.start.max(b.start))
}
