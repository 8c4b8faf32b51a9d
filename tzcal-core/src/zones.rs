//! Location labels ("Country/City") and their IANA zone identifiers.
//!
//! Labels are what users pick and what events store. Anything that isn't a
//! known label is passed through untouched, so canonical ids such as
//! `Europe/Lisbon` keep working without a table entry.

use chrono_tz::Tz;

use crate::error::{TzCalError, TzCalResult};

/// Label to zone id, sorted by label.
static ZONES: &[(&str, &str)] = &[
    ("Argentina/Buenos Aires", "America/Argentina/Buenos_Aires"),
    ("Australia/Brisbane", "Australia/Brisbane"),
    ("Australia/Melbourne", "Australia/Melbourne"),
    ("Australia/Perth", "Australia/Perth"),
    ("Australia/Sydney", "Australia/Sydney"),
    ("Austria/Vienna", "Europe/Vienna"),
    ("Bangladesh/Dhaka", "Asia/Dhaka"),
    ("Belgium/Brussels", "Europe/Brussels"),
    ("Brazil/Rio de Janeiro", "America/Sao_Paulo"),
    ("Brazil/Sao Paulo", "America/Sao_Paulo"),
    ("Canada/Calgary", "America/Edmonton"),
    ("Canada/Montreal", "America/Montreal"),
    ("Canada/Toronto", "America/Toronto"),
    ("Canada/Vancouver", "America/Vancouver"),
    ("China/Beijing", "Asia/Shanghai"),
    ("China/Hong Kong", "Asia/Hong_Kong"),
    ("China/Shanghai", "Asia/Shanghai"),
    ("Egypt/Cairo", "Africa/Cairo"),
    ("France/Paris", "Europe/Paris"),
    ("Germany/Berlin", "Europe/Berlin"),
    ("Greece/Athens", "Europe/Athens"),
    ("India/Bangalore", "Asia/Kolkata"),
    ("India/Delhi", "Asia/Kolkata"),
    ("India/Mumbai", "Asia/Kolkata"),
    ("Indonesia/Jakarta", "Asia/Jakarta"),
    ("Israel/Jerusalem", "Asia/Jerusalem"),
    ("Italy/Rome", "Europe/Rome"),
    ("Japan/Tokyo", "Asia/Tokyo"),
    ("Kenya/Nairobi", "Africa/Nairobi"),
    ("Malaysia/Kuala Lumpur", "Asia/Kuala_Lumpur"),
    ("Mexico/Mexico City", "America/Mexico_City"),
    ("Netherlands/Amsterdam", "Europe/Amsterdam"),
    ("New Zealand/Auckland", "Pacific/Auckland"),
    ("New Zealand/Wellington", "Pacific/Auckland"),
    ("Nigeria/Lagos", "Africa/Lagos"),
    ("Pakistan/Karachi", "Asia/Karachi"),
    ("Philippines/Manila", "Asia/Manila"),
    ("Poland/Warsaw", "Europe/Warsaw"),
    ("Russia/Moscow", "Europe/Moscow"),
    ("Russia/Saint Petersburg", "Europe/Moscow"),
    ("Saudi Arabia/Riyadh", "Asia/Riyadh"),
    ("Singapore/Singapore", "Asia/Singapore"),
    ("South Africa/Johannesburg", "Africa/Johannesburg"),
    ("South Korea/Seoul", "Asia/Seoul"),
    ("Spain/Madrid", "Europe/Madrid"),
    ("Switzerland/Zurich", "Europe/Zurich"),
    ("Taiwan/Taipei", "Asia/Taipei"),
    ("Thailand/Bangkok", "Asia/Bangkok"),
    ("Turkey/Istanbul", "Europe/Istanbul"),
    ("United Arab Emirates/Dubai", "Asia/Dubai"),
    ("United Kingdom/London", "Europe/London"),
    ("United States/Anchorage", "America/Anchorage"),
    ("United States/Chicago", "America/Chicago"),
    ("United States/Denver", "America/Denver"),
    ("United States/Honolulu", "Pacific/Honolulu"),
    ("United States/Los Angeles", "America/Los_Angeles"),
    ("United States/New York", "America/New_York"),
    ("United States/Phoenix", "America/Phoenix"),
    ("Vietnam/Hanoi", "Asia/Bangkok"),
];

/// Resolve a label to its canonical zone id, or return the label itself.
pub fn resolve(label: &str) -> &str {
    match ZONES.binary_search_by(|(l, _)| (*l).cmp(label)) {
        Ok(i) => ZONES[i].1,
        Err(_) => label,
    }
}

/// All labels in lexicographic order.
pub fn labels() -> Vec<&'static str> {
    ZONES.iter().map(|(label, _)| *label).collect()
}

/// All (label, zone id) pairs in label order.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    ZONES
}

/// Look up a canonical zone id in the tz database.
pub fn parse_zone(zone_id: &str) -> TzCalResult<Tz> {
    zone_id
        .parse::<Tz>()
        .map_err(|_| TzCalError::Conversion(format!("unknown timezone '{}'", zone_id)))
}

/// Resolve a label (or zone id) straight to a tz database entry.
pub fn zone_for(label: &str) -> TzCalResult<Tz> {
    parse_zone(resolve(label))
}

/// The zone this machine is running in, or UTC if it can't be determined.
pub fn local_zone_id() -> String {
    match iana_time_zone::get_timezone() {
        Ok(zone) => zone,
        Err(e) => {
            tracing::debug!("Could not detect local timezone, using UTC: {}", e);
            "UTC".to_string()
        }
    }
}
