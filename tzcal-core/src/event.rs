//! Event types.
//!
//! An event keeps its date and time exactly as entered, together with the
//! location label they are relative to. Parsing happens on demand (see
//! [`crate::convert`]) so a bad value shows up as a conversion placeholder
//! instead of making the whole snapshot unreadable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::TzCalResult;
use crate::zones;

/// A recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Milliseconds since the Unix epoch at creation, bumped to stay unique
    pub id: i64,
    pub title: String,
    /// `YYYY-MM-DD`, in `timezone`
    pub date: String,
    /// `HH:MM`, in `timezone`
    pub time: String,
    /// Location label (or canonical zone id)
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    /// Set once, the first time the reminder window is entered
    #[serde(default)]
    pub notified: bool,
}

/// The user-editable part of an event: form contents and share link payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        EventDraft {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            timezone: timezone.into(),
        }
    }

    /// Names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("date", &self.date),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Event {
    /// The shareable fields of this event.
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            timezone: self.timezone.clone(),
        }
    }

    /// Canonical zone id for this event's label.
    pub fn zone_id(&self) -> &str {
        zones::resolve(&self.timezone)
    }

    /// The absolute instant this event starts at.
    pub fn starts_at(&self) -> TzCalResult<DateTime<Utc>> {
        convert::event_instant(&self.date, &self.time, &self.timezone)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
