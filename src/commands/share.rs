use anyhow::Result;
use tzcal_core::{TzCalError, share};

use super::Context;

pub fn run(ctx: &Context, id: i64) -> Result<()> {
    let store = ctx.open_store()?;
    let event = store.get(id).ok_or(TzCalError::EventNotFound(id))?;

    let url = share::share_url(&ctx.config.share_base_url, event)?;

    eprintln!("{}", ctx.theme.muted(&format!("Share link for {}:", event.title)));
    println!("{}", url);

    Ok(())
}
