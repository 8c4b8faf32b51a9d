use anyhow::Result;

use super::{Context, print_empty};
use crate::render::{EventView, Render};

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let store = ctx.open_store()?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
        return Ok(());
    }

    if store.is_empty() {
        print_empty(ctx.theme);
        return Ok(());
    }

    let viewer_zone = ctx.config.viewer_zone();
    println!("{}", ctx.theme.muted(&format!("Times shown in {}", viewer_zone)));
    println!();

    for (i, event) in store.list().iter().enumerate() {
        let view = EventView {
            event,
            viewer_zone: &viewer_zone,
        };
        println!("{}", view.render(ctx.theme));

        if i < store.list().len() - 1 {
            println!();
        }
    }

    Ok(())
}
