//! Mood logging: append-only per-user entries with durable whole-file
//! persistence, plus trend reporting over the logged history.

use serde::{Deserialize, Serialize};

pub mod handlers;
pub mod store;
pub mod trend;

/// One logged mood entry. Immutable once written; the timestamp is assigned
/// by the store at write time, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub timestamp: String,
    pub mood: String,
}

impl MoodEntry {
    /// The calendar-date prefix of the ISO-8601 timestamp (`YYYY-MM-DD`).
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}
