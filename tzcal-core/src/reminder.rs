//! Reminders for events that are about to start.
//!
//! Every pending event is checked on a fixed period. Once an event is less
//! than [`REMINDER_LOOKAHEAD_MINUTES`] away, one notification is attempted and
//! the event is marked as notified whether or not the attempt worked. Events
//! that already started are left alone.
//!
//! Reminders stay off until the viewer grants notification permission through
//! [`enable`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::constants::REMINDER_LOOKAHEAD_MINUTES;
use crate::error::{TzCalError, TzCalResult};
use crate::event::Event;
use crate::store::{EventStore, SharedStore};

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked, or the prompt was dismissed
    #[default]
    Default,
}

/// A reminder for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub event_id: i64,
    pub title: String,
    pub time: String,
    pub minutes_until: i64,
}

impl Reminder {
    pub fn summary(&self) -> String {
        format!("Upcoming Event: {}", self.title)
    }

    pub fn body(&self) -> String {
        format!("Starting in {} minutes at {}", self.minutes_until, self.time)
    }

    /// Lets the platform collapse repeated notifications for the same event.
    pub fn tag(&self) -> String {
        format!("event-{}", self.event_id)
    }
}

/// Where reminders get delivered.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Current permission, without prompting. `Err(NotificationsUnsupported)`
    /// when the platform has no notification support at all.
    fn permission(&self) -> TzCalResult<Permission>;

    /// Ask the viewer for permission.
    async fn request_permission(&self) -> TzCalResult<Permission>;

    /// Show a reminder. Delivery is best-effort.
    fn notify(&self, reminder: &Reminder) -> TzCalResult<()>;
}

/// Turn reminders on: succeeds only once permission is granted.
///
/// Denied, dismissed and unsupported come back as errors meant to be shown to
/// the viewer. Nothing is retried.
pub async fn enable(notifier: &dyn Notifier) -> TzCalResult<()> {
    if notifier.permission()? == Permission::Granted {
        return Ok(());
    }

    match notifier.request_permission().await? {
        Permission::Granted => {
            tracing::info!("Notification permission granted");
            Ok(())
        }
        Permission::Denied => Err(TzCalError::PermissionDenied),
        Permission::Default => Err(TzCalError::PermissionDismissed),
    }
}

/// Reminder for `event` if it starts within the lookahead window after `now`.
pub fn due_reminder(event: &Event, now: DateTime<Utc>) -> Option<Reminder> {
    if event.notified {
        return None;
    }

    let starts_at = match event.starts_at() {
        Ok(instant) => instant,
        Err(e) => {
            tracing::debug!(id = event.id, "Skipping reminder check: {}", e);
            return None;
        }
    };

    let diff = starts_at - now;
    let window = chrono::Duration::minutes(REMINDER_LOOKAHEAD_MINUTES);
    if diff <= chrono::Duration::zero() || diff > window {
        return None;
    }

    // Nearest whole minute
    let minutes_until = (diff.num_seconds() + 30) / 60;

    Some(Reminder {
        event_id: event.id,
        title: event.title.clone(),
        time: event.time.clone(),
        minutes_until,
    })
}

/// Mark every due event as notified and return their reminders.
///
/// An event is claimed before its reminder goes out, so it gets one attempt
/// even if delivery fails. A failed save is logged and the remaining events
/// are still claimed.
pub fn claim_due(store: &mut EventStore, now: DateTime<Utc>) -> Vec<Reminder> {
    let due: Vec<Reminder> = store
        .list()
        .iter()
        .filter_map(|event| due_reminder(event, now))
        .collect();

    for reminder in &due {
        if let Err(e) = store.mark_notified(reminder.event_id) {
            tracing::warn!(id = reminder.event_id, "Could not save reminded flag: {}", e);
        }
    }

    tracing::debug!(checked = store.list().len(), due = due.len(), "Reminder scan done");
    due
}

/// Show each reminder. Delivery failures are logged and skipped.
pub fn deliver(notifier: &dyn Notifier, reminders: &[Reminder]) {
    for reminder in reminders {
        match notifier.notify(reminder) {
            Ok(()) => {
                tracing::info!(id = reminder.event_id, title = %reminder.title, "Reminder sent")
            }
            Err(e) => tracing::warn!(id = reminder.event_id, "Notification error: {}", e),
        }
    }
}

/// Check every event once. Returns the reminders that were attempted.
pub fn scan(store: &mut EventStore, notifier: &dyn Notifier, now: DateTime<Utc>) -> Vec<Reminder> {
    let due = claim_due(store, now);
    deliver(notifier, &due);
    due
}

pub struct ReminderScheduler;

impl ReminderScheduler {
    /// Start scanning `store` every `period` (first scan one period from now).
    /// Must be called inside a Tokio runtime.
    pub fn start(store: SharedStore, notifier: Arc<dyn Notifier>, period: Duration) -> ReminderHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !scan_shared(&store, notifier.as_ref()) {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("Reminder loop: shutdown requested");
                        break;
                    }
                }
            }

            tracing::debug!("Reminder loop exited");
        });

        ReminderHandle {
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// One scheduled scan. Returns false when the store can no longer be used.
///
/// The store lock is released before notifications are shown.
fn scan_shared(store: &SharedStore, notifier: &dyn Notifier) -> bool {
    let due = {
        let Ok(mut guard) = store.lock() else {
            tracing::error!("Event store lock poisoned, stopping reminders");
            return false;
        };

        if let Err(e) = guard.reload() {
            tracing::warn!("Could not reload events, scanning the ones in memory: {}", e);
        }

        claim_due(&mut guard, Utc::now())
    };

    deliver(notifier, &due);
    true
}

/// Owns the running scan task. Dropping it aborts the task.
pub struct ReminderHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReminderHandle {
    /// Stop scanning and wait for the task to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Reminder task ended abnormally: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for ReminderHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
