use anyhow::Result;
use tzcal_core::preferences::Preferences;

use super::Context;
use crate::render::Theme;

pub fn run(ctx: &Context) -> Result<()> {
    let mut prefs = Preferences::load(ctx.storage.as_ref())?;
    prefs.toggle_dark_mode(ctx.storage.as_ref())?;

    let theme = Theme::from_preferences(&prefs);
    let name = match theme {
        Theme::Dark => "Dark mode on",
        Theme::Light => "Dark mode off",
    };
    println!("{}", theme.success(name));

    Ok(())
}
