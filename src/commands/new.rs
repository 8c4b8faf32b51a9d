use anyhow::Result;
use dialoguer::{Input, Select};
use tzcal_core::config::TzcalConfig;
use tzcal_core::event::EventDraft;
use tzcal_core::{convert, share, zones};

use super::Context;

pub struct NewArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub zone: Option<String>,
    pub link: Option<String>,
}

pub fn run(args: NewArgs, ctx: &Context) -> Result<()> {
    let theme = ctx.theme;
    let config = &ctx.config;

    // A share link only pre-fills the form
    let prefill = args.link.as_deref().and_then(|link| {
        let draft = share::prefill_from_link(link);
        if draft.is_none() {
            eprintln!("  {}", theme.warning("Could not read that share link, starting empty"));
        }
        draft
    });

    let draft = merge_draft(prefill, args.title, args.date, args.time, args.zone.clone(), config);
    let interactive = !draft.missing_fields().is_empty();

    let draft = if interactive {
        prompt_draft(draft, args.zone.is_some())?
    } else {
        draft
    };

    if zones::zone_for(&draft.timezone).is_err() {
        eprintln!(
            "  {}",
            theme.warning(&format!(
                "Unknown timezone '{}': local times will show as invalid",
                draft.timezone
            ))
        );
    }

    // Opened after prompting so the snapshot is as fresh as possible
    let mut store = ctx.open_store()?;
    let event = store.add(draft)?;

    if interactive {
        println!();
    }
    println!("{}", theme.success(&format!("  Created: {}", event.title)));
    println!(
        "  {}",
        theme.accent(&convert::display_local_time(
            &event.date,
            &event.time,
            &event.timezone,
            &config.viewer_zone(),
        ))
    );

    Ok(())
}

/// Flags win over the share link; the zone falls back to the configured default.
fn merge_draft(
    prefill: Option<EventDraft>,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    zone: Option<String>,
    config: &TzcalConfig,
) -> EventDraft {
    let base = prefill.unwrap_or_default();

    let timezone = zone
        .or_else(|| Some(base.timezone).filter(|z| !z.trim().is_empty()))
        .unwrap_or_else(|| config.default_zone());

    EventDraft {
        title: title.unwrap_or(base.title),
        date: date.unwrap_or(base.date),
        time: time.unwrap_or(base.time),
        timezone,
    }
}

/// Ask for whatever the draft is still missing.
fn prompt_draft(mut draft: EventDraft, zone_given: bool) -> Result<EventDraft> {
    if draft.title.trim().is_empty() {
        draft.title = Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?;
    }

    if convert::parse_date(&draft.date).is_err() {
        draft.date = prompt_with_retry("  Date (YYYY-MM-DD)", &draft.date, |s| {
            convert::parse_date(s).map(|_| ())
        })?;
    }

    if convert::parse_time(&draft.time).is_err() {
        draft.time = prompt_with_retry("  Time (HH:MM)", &draft.time, |s| {
            convert::parse_time(s).map(|_| ())
        })?;
    }

    if !zone_given {
        draft.timezone = prompt_zone(&draft.timezone)?;
    }

    Ok(draft)
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, initial: &str, validate: F) -> Result<String>
where
    F: Fn(&str) -> tzcal_core::TzCalResult<()>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if !initial.trim().is_empty() {
            input = input.with_initial_text(initial);
        }
        let value = input.interact_text()?;

        match validate(&value) {
            Ok(()) => return Ok(value),
            Err(e) => eprintln!("  {}", e),
        }
    }
}

/// Pick a location label, starting on `current`.
fn prompt_zone(current: &str) -> Result<String> {
    let items = zone_choices(current);
    let selection = Select::new()
        .with_prompt("  Timezone")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(items[selection].to_string())
}

/// `current` first, then every known label.
fn zone_choices(current: &str) -> Vec<&str> {
    let mut items = vec![current];
    items.extend(zones::labels().into_iter().filter(|label| *label != current));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TzcalConfig {
        TzcalConfig {
            default_timezone: Some("India/Delhi".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn flags_override_prefill() {
        let prefill = EventDraft::new("Shared", "2025-03-20", "15:00", "Japan/Tokyo");
        let draft = merge_draft(
            Some(prefill),
            Some("Mine".to_string()),
            None,
            Some("16:00".to_string()),
            None,
            &config(),
        );
        assert_eq!(draft, EventDraft::new("Mine", "2025-03-20", "16:00", "Japan/Tokyo"));
    }

    #[test]
    fn zone_falls_back_to_config_default() {
        let draft = merge_draft(None, Some("Call".to_string()), None, None, None, &config());
        assert_eq!(draft.timezone, "India/Delhi");
        assert_eq!(draft.missing_fields(), vec!["date", "time"]);
    }

    #[test]
    fn blank_prefill_zone_uses_default() {
        let prefill = EventDraft::new("Shared", "2025-03-20", "15:00", " ");
        let draft = merge_draft(Some(prefill), None, None, None, None, &config());
        assert_eq!(draft.timezone, "India/Delhi");
    }

    #[test]
    fn zone_choices_put_current_first_without_duplicates() {
        let items = zone_choices("Japan/Tokyo");
        assert_eq!(items[0], "Japan/Tokyo");
        assert_eq!(items.iter().filter(|l| **l == "Japan/Tokyo").count(), 1);
        assert_eq!(items.len(), zones::labels().len());

        let items = zone_choices("Europe/Lisbon");
        assert_eq!(items[0], "Europe/Lisbon");
        assert_eq!(items.len(), zones::labels().len() + 1);
    }
}
