use anyhow::Result;
use tzcal_core::constants::REMINDER_LOOKAHEAD_MINUTES;
use tzcal_core::reminder;

use super::Context;
use crate::notifier::DesktopNotifier;

pub async fn run(ctx: &Context) -> Result<()> {
    let notifier = DesktopNotifier::new(ctx.config.clone());

    match reminder::enable(&notifier).await {
        Ok(()) => {
            // The grant is already recorded at this point
            if let Err(e) = notifier.show("Notifications Enabled!", &enabled_body()) {
                tracing::warn!("Could not show confirmation notification: {}", e);
            }
            println!("{}", ctx.theme.success("Notifications enabled"));
            Ok(())
        }
        Err(e) if e.is_permission() => {
            println!("{}", ctx.theme.warning(&e.to_string()));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn enabled_body() -> String {
    format!(
        "You will receive reminders {} minutes before your events",
        REMINDER_LOOKAHEAD_MINUTES
    )
}
