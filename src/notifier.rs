//! Desktop notifications for reminders.
//!
//! The desktop has no permission model of its own, so tzcal asks once and
//! records the answer in the config file. A missing notification server means
//! notifications are unsupported.

use std::sync::Mutex;

use async_trait::async_trait;
use dialoguer::Confirm;
use notify_rust::Notification;
use tzcal_core::config::TzcalConfig;
use tzcal_core::reminder::{Notifier, Permission, Reminder};
use tzcal_core::{TzCalError, TzCalResult};

const APP_NAME: &str = "tzcal";

pub struct DesktopNotifier {
    config: Mutex<TzcalConfig>,
}

impl DesktopNotifier {
    pub fn new(config: TzcalConfig) -> Self {
        DesktopNotifier {
            config: Mutex::new(config),
        }
    }

    /// Show a one-off notification.
    pub fn show(&self, summary: &str, body: &str) -> TzCalResult<()> {
        Notification::new()
            .appname(APP_NAME)
            .summary(summary)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| TzCalError::Notify(e.to_string()))
    }

    fn record(&self, permission: Permission) -> TzCalResult<()> {
        let mut config = self
            .config
            .lock()
            .map_err(|_| TzCalError::Config("config lock poisoned".into()))?;
        config.notifications = permission;
        config.save()
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn notifications_supported() -> bool {
    match notify_rust::get_server_information() {
        Ok(info) => {
            tracing::debug!(server = %info.name, "Found notification server");
            true
        }
        Err(e) => {
            tracing::debug!("No notification server: {}", e);
            false
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn notifications_supported() -> bool {
    true
}

#[async_trait]
impl Notifier for DesktopNotifier {
    fn permission(&self) -> TzCalResult<Permission> {
        if !notifications_supported() {
            return Err(TzCalError::NotificationsUnsupported);
        }

        let config = self
            .config
            .lock()
            .map_err(|_| TzCalError::Config("config lock poisoned".into()))?;
        Ok(config.notifications)
    }

    async fn request_permission(&self) -> TzCalResult<Permission> {
        let answer = tokio::task::spawn_blocking(|| {
            Confirm::new()
                .with_prompt("  Allow tzcal to show desktop notifications?")
                .default(true)
                .interact_opt()
        })
        .await
        .map_err(|e| TzCalError::Notify(e.to_string()))?;

        let permission = match answer {
            Ok(Some(true)) => Permission::Granted,
            Ok(Some(false)) => Permission::Denied,
            Ok(None) => Permission::Default,
            Err(e) => {
                tracing::warn!("Could not ask for notification permission: {}", e);
                Permission::Default
            }
        };

        // A dismissed prompt isn't an answer; leave it unrecorded
        if permission != Permission::Default {
            self.record(permission)?;
        }

        Ok(permission)
    }

    fn notify(&self, reminder: &Reminder) -> TzCalResult<()> {
        tracing::debug!(tag = %reminder.tag(), "Showing reminder");
        self.show(&reminder.summary(), &reminder.body())
    }
}
