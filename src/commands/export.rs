use anyhow::Result;
use tzcal_core::{TzCalError, calendar_link};

use super::Context;

pub fn run(ctx: &Context, id: i64, no_open: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let event = store.get(id).ok_or(TzCalError::EventNotFound(id))?;

    let url = calendar_link::google_calendar_url(event)?;
    println!("{}", url);

    if no_open {
        return Ok(());
    }

    if let Err(e) = open::that(url.as_str()) {
        tracing::warn!("Could not open browser: {}", e);
        eprintln!(
            "{}",
            ctx.theme.warning("Couldn't open a browser. Open the link above manually.")
        );
    }

    Ok(())
}
