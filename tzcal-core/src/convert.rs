//! Wall-clock conversion between an event's zone and the viewer's zone.
//!
//! An event's date and time are read as local time *in the event's own
//! zone*, giving an absolute instant, which is then formatted in the viewer's
//! zone. (The web version of this tool parsed them in the machine's zone
//! instead, which was only right when both zones happened to agree.)

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::INVALID_DATE_TIME;
use crate::error::{TzCalError, TzCalResult};
use crate::zones;

/// e.g. "Thursday, March 20, 2025 at 3:00 PM"
const DISPLAY_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p";

/// Parse `YYYY-MM-DD`.
pub fn parse_date(date: &str) -> TzCalResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| TzCalError::Conversion(format!("malformed date '{}'", date)))
}

/// Parse `HH:MM` (seconds are tolerated).
pub fn parse_time(time: &str) -> TzCalResult<NaiveTime> {
    let time_str = time.trim();
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M:%S"))
        .map_err(|_| TzCalError::Conversion(format!("malformed time '{}'", time)))
}

/// Pin a naive wall-clock time to `zone`.
///
/// Ambiguous times (clocks going back) take the earlier offset. Times that
/// fall in a gap (clocks going forward) are moved forward by an hour.
pub fn localize(zone: Tz, naive: NaiveDateTime) -> TzCalResult<DateTime<Tz>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .ok_or_else(|| {
            TzCalError::Conversion(format!("{} does not exist in {}", naive, zone.name()))
        })
}

/// The absolute instant of `date` + `time` as wall-clock time in `label`'s zone.
pub fn event_instant(date: &str, time: &str, label: &str) -> TzCalResult<DateTime<Utc>> {
    let zone = zones::zone_for(label)?;
    let naive = parse_date(date)?.and_time(parse_time(time)?);
    Ok(localize(zone, naive)?.with_timezone(&Utc))
}

/// Format an instant for display in `zone`.
pub fn format_in_zone(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(DISPLAY_FORMAT).to_string()
}

/// The event's start as seen from `viewer_zone` (a label or zone id).
pub fn to_viewer_local_time(
    date: &str,
    time: &str,
    label: &str,
    viewer_zone: &str,
) -> TzCalResult<String> {
    let instant = event_instant(date, time, label)?;
    let viewer = zones::zone_for(viewer_zone)?;
    Ok(format_in_zone(instant, viewer))
}

/// Like [`to_viewer_local_time`], but never fails: problems render as
/// "Invalid date/time".
pub fn display_local_time(date: &str, time: &str, label: &str, viewer_zone: &str) -> String {
    to_viewer_local_time(date, time, label, viewer_zone).unwrap_or_else(|e| {
        tracing::warn!(date, time, label, viewer_zone, "Conversion error: {}", e);
        INVALID_DATE_TIME.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_afternoon_is_new_york_early_morning() {
        let local = to_viewer_local_time("2025-03-20", "15:00", "Japan/Tokyo", "America/New_York");
        assert_eq!(local.unwrap(), "Thursday, March 20, 2025 at 2:00 AM");
    }

    #[test]
    fn same_zone_keeps_wall_clock() {
        let local = to_viewer_local_time(
            "2025-03-20",
            "15:00",
            "United Kingdom/London",
            "Europe/London",
        );
        assert_eq!(local.unwrap(), "Thursday, March 20, 2025 at 3:00 PM");
    }

    #[test]
    fn viewer_zone_may_be_a_label() {
        let local = to_viewer_local_time("2025-07-01", "09:30", "Europe/Berlin", "India/Mumbai");
        assert_eq!(local.unwrap(), "Tuesday, July 1, 2025 at 1:00 PM");
    }

    #[test]
    fn event_instant_uses_event_zone() {
        let instant = event_instant("2025-03-20", "15:00", "Japan/Tokyo").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 20, 6, 0, 0).unwrap());
    }

    #[test]
    fn event_instant_accepts_seconds() {
        let instant = event_instant("2025-03-20", "15:00:30", "UTC").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 30).unwrap());
    }

    #[test]
    fn gap_moves_forward_an_hour() {
        // 02:30 doesn't exist in New York on 2025-03-09
        let instant = event_instant("2025-03-09", "02:30", "United States/New York").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap());
    }

    #[test]
    fn ambiguous_takes_earlier_offset() {
        // 01:30 happens twice in New York on 2025-11-02; first one is EDT
        let instant = event_instant("2025-11-02", "01:30", "United States/New York").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 11, 2, 5, 30, 0).unwrap());
    }

    #[test]
    fn malformed_input_is_conversion_error() {
        assert!(matches!(
            event_instant("2025-13-40", "15:00", "UTC"),
            Err(TzCalError::Conversion(_))
        ));
        assert!(matches!(
            event_instant("2025-03-20", "3pm", "UTC"),
            Err(TzCalError::Conversion(_))
        ));
        assert!(matches!(
            event_instant("2025-03-20", "15:00", "Atlantis/Capital"),
            Err(TzCalError::Conversion(_))
        ));
    }

    #[test]
    fn display_degrades_to_placeholder() {
        assert_eq!(
            display_local_time("not a date", "15:00", "Japan/Tokyo", "UTC"),
            INVALID_DATE_TIME
        );
        assert_eq!(
            display_local_time("2025-03-20", "15:00", "Japan/Tokyo", "Nowhere/Special"),
            INVALID_DATE_TIME
        );
    }

    #[test]
    fn conversion_is_deterministic() {
        let a = display_local_time("2025-12-31", "23:45", "Australia/Sydney", "America/Los_Angeles");
        let b = display_local_time("2025-12-31", "23:45", "Australia/Sydney", "America/Los_Angeles");
        assert_eq!(a, b);
        assert_eq!(a, "Wednesday, December 31, 2025 at 4:45 AM");
    }
}
