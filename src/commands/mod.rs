pub mod convert;
pub mod delete;
pub mod export;
pub mod list;
pub mod new;
pub mod notifications;
pub mod share;
pub mod theme;
pub mod watch;
pub mod zones;

use std::sync::Arc;

use anyhow::Result;
use tzcal_core::config::TzcalConfig;
use tzcal_core::preferences::Preferences;
use tzcal_core::storage::{FileStorage, Storage};
use tzcal_core::store::EventStore;

use crate::render::Theme;

/// Everything a command needs, loaded once per invocation.
pub struct Context {
    pub config: TzcalConfig,
    pub storage: Arc<FileStorage>,
    pub theme: Theme,
}

impl Context {
    pub fn load(config: TzcalConfig) -> Result<Self> {
        let storage = Arc::new(config.storage());
        let prefs = Preferences::load(storage.as_ref())?;

        Ok(Context {
            config,
            storage,
            theme: Theme::from_preferences(&prefs),
        })
    }

    pub fn open_store(&self) -> Result<EventStore> {
        let storage: Arc<dyn Storage> = self.storage.clone();
        Ok(EventStore::open(storage)?)
    }
}

/// Hint shown when there are no events yet
pub fn print_empty(theme: Theme) {
    println!("{}", theme.muted("No events yet."));
    println!();
    println!("Add one with:");
    println!("  tzcal new \"Team sync\" --date 2025-03-20 --time 15:00 --zone Japan/Tokyo");
}
