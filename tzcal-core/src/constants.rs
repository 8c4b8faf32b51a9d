use std::time::Duration;

/// How far ahead of an event's start a reminder is sent.
pub const REMINDER_LOOKAHEAD_MINUTES: i64 = 15;

/// Period between reminder scans.
pub const REMINDER_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Length given to events exported to an external calendar.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

/// Storage key for the event snapshot.
pub const EVENTS_KEY: &str = "events";

/// Storage key for the dark mode preference.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Placeholder shown when an event's time can't be converted.
pub const INVALID_DATE_TIME: &str = "Invalid date/time";
