use std::sync::Arc;

use anyhow::Result;
use tzcal_core::constants::{REMINDER_LOOKAHEAD_MINUTES, REMINDER_SCAN_INTERVAL};
use tzcal_core::reminder::{self, ReminderScheduler};

use super::Context;
use crate::notifier::DesktopNotifier;
use crate::utils::tui::create_watch_spinner;

pub async fn run(ctx: &Context) -> Result<()> {
    let notifier = DesktopNotifier::new(ctx.config.clone());

    match reminder::enable(&notifier).await {
        Ok(()) => {}
        Err(e) if e.is_permission() => {
            println!("{}", ctx.theme.warning(&e.to_string()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let store = ctx.open_store()?.shared();
    let handle = ReminderScheduler::start(store, Arc::new(notifier), REMINDER_SCAN_INTERVAL);

    let spinner = create_watch_spinner(
        format!(
            "Watching for events starting within {} minutes (Ctrl-C to stop)",
            REMINDER_LOOKAHEAD_MINUTES
        ),
        ctx.theme,
    );

    let result = tokio::signal::ctrl_c().await;
    spinner.finish_and_clear();
    handle.stop().await;
    result?;

    println!("{}", ctx.theme.muted("Stopped watching"));
    Ok(())
}
