//! Error types for the Hours Engine.
//!
//! Everything that can go wrong happens at the boundary: raw strings
//! that are not valid clock times, pause amounts that are not usable
//! numbers, and timesheet edits that point at users or entries that do
//! not exist.  The interval arithmetic itself is total and never fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// A time string is not a valid `HH:MM` wall-clock time.
    #[error("malformed time {0:?}: expected HH:MM between 00:00 and 23:59")]
    MalformedTime(String),

    /// A pause amount is non-numeric, not finite or negative.
    #[error("invalid pause {0:?}: expected a non-negative number")]
    InvalidPause(String),

    #[error("unknown user {0:?}")]
    UnknownUser(String),

    #[error("user {user:?} has no entry at index {index}")]
    EntryOutOfRange { user: String, index: usize },

    /// A timesheet always keeps at least one entry.
    #[error("cannot remove the last entry of a timesheet")]
    LastEntry,
}
