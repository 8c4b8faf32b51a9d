//! Terminal rendering for tzcal types.
//!
//! Colors follow the viewer's dark mode preference: dark mode uses the
//! bright variants so text stays readable on dark backgrounds.

use owo_colors::OwoColorize;
use tzcal_core::Event;
use tzcal_core::convert;
use tzcal_core::preferences::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        if prefs.dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn accent(self, text: &str) -> String {
        match self {
            Theme::Light => text.cyan().to_string(),
            Theme::Dark => text.bright_cyan().to_string(),
        }
    }

    pub fn success(self, text: &str) -> String {
        match self {
            Theme::Light => text.green().to_string(),
            Theme::Dark => text.bright_green().to_string(),
        }
    }

    pub fn warning(self, text: &str) -> String {
        match self {
            Theme::Light => text.yellow().to_string(),
            Theme::Dark => text.bright_yellow().to_string(),
        }
    }

    pub fn error(self, text: &str) -> String {
        match self {
            Theme::Light => text.red().to_string(),
            Theme::Dark => text.bright_red().to_string(),
        }
    }

    pub fn muted(self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

/// Extension trait for themed terminal rendering.
pub trait Render {
    fn render(&self, theme: Theme) -> String;
}

/// An event as seen from the viewer's zone.
pub struct EventView<'a> {
    pub event: &'a Event,
    pub viewer_zone: &'a str,
}

impl Render for EventView<'_> {
    fn render(&self, theme: Theme) -> String {
        let event = self.event;
        let local = convert::display_local_time(
            &event.date,
            &event.time,
            &event.timezone,
            self.viewer_zone,
        );

        let mut lines = vec![format!(
            "📅 {} {}",
            event.title.bold(),
            theme.muted(&format!("[{}]", event.id))
        )];
        lines.push(format!(
            "   {} {} at {} ({})",
            theme.muted("Original:  "),
            event.date,
            event.time,
            event.timezone
        ));
        let local = if local == tzcal_core::constants::INVALID_DATE_TIME {
            theme.error(&local)
        } else {
            theme.accent(&local)
        };
        lines.push(format!("   {} {}", theme.muted("Your time: "), local));

        if event.notified {
            lines.push(format!("   {}", theme.success("🔔 Reminded")));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(notified: bool) -> Event {
        Event {
            id: 42,
            title: "Standup".to_string(),
            date: "2025-03-20".to_string(),
            time: "15:00".to_string(),
            timezone: "Japan/Tokyo".to_string(),
            created_at: Utc::now(),
            notified,
        }
    }

    #[test]
    fn event_view_shows_original_and_local_time() {
        let event = event(false);
        let view = EventView {
            event: &event,
            viewer_zone: "America/New_York",
        };
        let out = view.render(Theme::Light);

        assert!(out.contains("Standup"));
        assert!(out.contains("[42]"));
        assert!(out.contains("2025-03-20 at 15:00 (Japan/Tokyo)"));
        assert!(out.contains("Thursday, March 20, 2025 at 2:00 AM"));
        assert!(!out.contains("Reminded"));
    }

    #[test]
    fn reminded_events_are_marked() {
        let event = event(true);
        let view = EventView {
            event: &event,
            viewer_zone: "UTC",
        };
        assert!(view.render(Theme::Dark).contains("Reminded"));
    }

    #[test]
    fn bad_viewer_zone_shows_placeholder() {
        let event = event(false);
        let view = EventView {
            event: &event,
            viewer_zone: "Not/AZone",
        };
        assert!(view.render(Theme::Light).contains("Invalid date/time"));
    }
}
