//! Persisted timesheets.
//!
//! The [`Store`] owns the registered users, each user's list of
//! entries and the currently selected user.  It is plain data: the
//! engine only ever sees borrowed snapshots of it.  Stores are saved
//! as versioned JSON; [`Store::from_json`] also accepts the older flat
//! list of `{ time, date, note }` records, where `time` was an amount
//! of hours worked, and folds it into a single user.

use crate::engine::summarize_user;
use crate::error::TimeError;
use crate::models::{today, Entry, ShiftWindow, UserProfile};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

/// Version written by [`Store::to_json`].
pub const STORE_VERSION: u32 = 2;

/// Id of the user that receives migrated legacy entries.
pub const LEGACY_USER_ID: &str = "legacy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    version: u32,
    #[serde(default)]
    users: Vec<UserProfile>,
    #[serde(default)]
    entries: BTreeMap<String, Vec<Entry>>,
    #[serde(default)]
    selected: Option<String>,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            version: STORE_VERSION,
            users: Vec::new(),
            entries: BTreeMap::new(),
            selected: None,
        }
    }
}

/// A legacy record: one worked amount per line.
#[derive(Debug, Deserialize)]
struct LegacyEntry {
    #[serde(default)]
    time: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    note: Option<String>,
}

impl From<LegacyEntry> for Entry {
    fn from(legacy: LegacyEntry) -> Self {
        let time = legacy.time.trim();
        // "00:00" was the placeholder of an untouched row.
        let (start, end) = if time.is_empty() || time == "00:00" {
            (String::new(), String::new())
        } else {
            ("00:00".to_string(), time.to_string())
        };
        Entry {
            start,
            end,
            date: legacy.date.map_or_else(today, |d| d.with_timezone(&Local).date_naive()),
            note: legacy.note.unwrap_or_default(),
        }
    }
}

impl Store {
    /// Parses a saved store, migrating the legacy flat list if needed.
    ///
    /// The JSON shape picks the format: an array is the legacy list, an
    /// object is a versioned store.
    pub fn from_json(data: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(data).context("store is not valid JSON")?;
        match value {
            Value::Array(_) => {
                let entries = Vec::<LegacyEntry>::deserialize(value).context("invalid legacy entry list")?;
                warn!(entries = entries.len(), "migrating legacy entry list");
                Ok(Self::from_legacy(entries))
            }
            Value::Object(_) => {
                let store = Store::deserialize(value).context("invalid timesheet store")?;
                if store.version != STORE_VERSION {
                    bail!("unsupported store version {}", store.version);
                }
                Ok(store)
            }
            _ => bail!("store is neither a timesheet store nor a legacy entry list"),
        }
    }

    fn from_legacy(entries: Vec<LegacyEntry>) -> Self {
        let mut store = Store::default();
        if entries.is_empty() {
            return store;
        }
        store.users.push(UserProfile {
            id: LEGACY_USER_ID.to_string(),
            name: "Legacy".to_string(),
            shift: None,
        });
        store
            .entries
            .insert(LEGACY_USER_ID.to_string(), entries.into_iter().map(Entry::from).collect());
        store.selected = Some(LEGACY_USER_ID.to_string());
        store
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a store from disk.  A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no store file, starting empty");
            return Ok(Store::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading store {}", path.display()))?;
        let store = Self::from_json(&data).with_context(|| format!("parsing store {}", path.display()))?;
        info!(path = %path.display(), users = store.users.len(), "loaded store");
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing store {}", path.display()))?;
        info!(path = %path.display(), users = self.users.len(), "saved store");
        Ok(())
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Result<&UserProfile, TimeError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| TimeError::UnknownUser(id.to_string()))
    }

    /// Registers a user with one blank entry and returns the new id.
    /// The first registered user becomes the selected one.
    pub fn add_user(&mut self, name: &str, shift: Option<ShiftWindow>) -> String {
        let id = Uuid::new_v4().to_string();
        self.users.push(UserProfile {
            id: id.clone(),
            name: name.trim().to_string(),
            shift,
        });
        self.entries.insert(id.clone(), vec![Entry::blank()]);
        if self.selected.is_none() {
            self.selected = Some(id.clone());
        }
        id
    }

    pub fn remove_user(&mut self, id: &str) -> Result<UserProfile, TimeError> {
        let position = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| TimeError::UnknownUser(id.to_string()))?;
        let removed = self.users.remove(position);
        self.entries.remove(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = self.users.first().map(|u| u.id.clone());
        }
        Ok(removed)
    }

    pub fn select_user(&mut self, id: &str) -> Result<(), TimeError> {
        self.user(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn selected_user(&self) -> Option<&UserProfile> {
        self.selected.as_deref().and_then(|id| self.user(id).ok())
    }

    pub fn entries(&self, user: &str) -> Result<&[Entry], TimeError> {
        self.user(user)?;
        Ok(self.entries.get(user).map(Vec::as_slice).unwrap_or_default())
    }

    fn entries_mut(&mut self, user: &str) -> Result<&mut Vec<Entry>, TimeError> {
        self.user(user)?;
        Ok(self.entries.entry(user.to_string()).or_default())
    }

    fn entry_mut(&mut self, user: &str, index: usize) -> Result<&mut Entry, TimeError> {
        self.entries_mut(user)?
            .get_mut(index)
            .ok_or_else(|| TimeError::EntryOutOfRange { user: user.to_string(), index })
    }

    /// Appends a blank entry and returns its index.
    pub fn add_entry(&mut self, user: &str) -> Result<usize, TimeError> {
        let entries = self.entries_mut(user)?;
        entries.push(Entry::blank());
        Ok(entries.len() - 1)
    }

    /// Stores raw start/end strings.  They are validated when totals
    /// are computed, not here, so half-typed input can be kept.
    pub fn update_entry_times(
        &mut self,
        user: &str,
        index: usize,
        start: &str,
        end: &str,
    ) -> Result<(), TimeError> {
        let entry = self.entry_mut(user, index)?;
        entry.start = start.to_string();
        entry.end = end.to_string();
        Ok(())
    }

    pub fn update_note(&mut self, user: &str, index: usize, note: &str) -> Result<(), TimeError> {
        self.entry_mut(user, index)?.note = note.to_string();
        Ok(())
    }

    pub fn update_date(&mut self, user: &str, index: usize, date: NaiveDate) -> Result<(), TimeError> {
        self.entry_mut(user, index)?.date = date;
        Ok(())
    }

    /// Removes an entry.  The last remaining entry cannot be removed.
    pub fn remove_entry(&mut self, user: &str, index: usize) -> Result<Entry, TimeError> {
        let entries = self.entries_mut(user)?;
        if index >= entries.len() {
            return Err(TimeError::EntryOutOfRange { user: user.to_string(), index });
        }
        if entries.len() == 1 {
            return Err(TimeError::LastEntry);
        }
        Ok(entries.remove(index))
    }

    /// Resets a user's timesheet to a single blank entry.
    pub fn clear_entries(&mut self, user: &str) -> Result<(), TimeError> {
        *self.entries_mut(user)? = vec![Entry::blank()];
        Ok(())
    }

    /// Plain-text listing of a user's entries followed by the totals.
    pub fn export_text(&self, user: &str) -> Result<String, TimeError> {
        let profile = self.user(user)?;
        let entries = self.entries(user)?;
        let summary = summarize_user(profile, entries)?;

        let mut lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let mut line = format!(
                    "Entry {} - {} - {} to {}",
                    i + 1,
                    e.date.format("%d/%m/%Y"),
                    display_time(&e.start),
                    display_time(&e.end)
                );
                if !e.note.is_empty() {
                    line.push_str(" - ");
                    line.push_str(&e.note);
                }
                line
            })
            .collect();
        lines.push(format!("Total: {}", summary.totals.total));
        if profile.shift.is_some() {
            lines.push(format!("Extra: {}", summary.totals.extra));
        }
        Ok(lines.join("\n"))
    }
}

fn display_time(raw: &str) -> &str {
    match raw.trim() {
        "" => "--:--",
        t => t,
    }
}
