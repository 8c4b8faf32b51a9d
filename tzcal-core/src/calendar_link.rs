//! "Add to Google Calendar" links.

use chrono::{DateTime, Duration, Utc};
use url::Url;

use crate::constants::DEFAULT_EVENT_DURATION_MINUTES;
use crate::error::{TzCalError, TzCalResult};
use crate::event::Event;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

fn compact_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Template link that opens Google Calendar with the event filled in.
/// Events are exported with a one hour duration.
pub fn google_calendar_url(event: &Event) -> TzCalResult<Url> {
    let start = event.starts_at()?;
    let end = start + Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES);
    let dates = format!("{}/{}", compact_utc(start), compact_utc(end));
    let details = format!("Event in {}", event.timezone);

    Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", details.as_str()),
            ("location", event.timezone.as_str()),
            ("ctz", event.zone_id()),
        ],
    )
    .map_err(|e| TzCalError::Config(e.to_string()))
}
