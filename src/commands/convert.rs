use anyhow::Result;
use tzcal_core::convert;

use super::Context;

pub fn run(ctx: &Context, date: &str, time: &str, zone: &str, to: Option<String>) -> Result<()> {
    let viewer_zone = to.unwrap_or_else(|| ctx.config.viewer_zone());
    let local = convert::to_viewer_local_time(date, time, zone, &viewer_zone)?;

    println!("{} at {} ({})", date, time, zone);
    println!("{} {}", ctx.theme.muted(&format!("{}:", viewer_zone)), ctx.theme.accent(&local));

    Ok(())
}
