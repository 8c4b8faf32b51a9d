//! Viewer preferences persisted alongside the events.

use crate::constants::DARK_MODE_KEY;
use crate::error::{TzCalError, TzCalResult};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    /// Load preferences; anything missing or unreadable falls back to the default.
    pub fn load(storage: &dyn Storage) -> TzCalResult<Self> {
        let dark_mode = match storage.get(DARK_MODE_KEY)? {
            Some(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable dark mode preference: {}", e);
                false
            }),
            None => false,
        };

        Ok(Preferences { dark_mode })
    }

    pub fn save(&self, storage: &dyn Storage) -> TzCalResult<()> {
        let content = serde_json::to_string(&self.dark_mode)
            .map_err(|e| TzCalError::Serialization(e.to_string()))?;
        storage.set(DARK_MODE_KEY, &content)
    }

    /// Flip dark mode and persist it. Returns the new value.
    pub fn toggle_dark_mode(&mut self, storage: &dyn Storage) -> TzCalResult<bool> {
        self.dark_mode = !self.dark_mode;
        self.save(storage)?;
        Ok(self.dark_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_light() {
        let storage = MemoryStorage::new();
        assert!(!Preferences::load(&storage).unwrap().dark_mode);
    }

    #[test]
    fn toggle_persists() {
        let storage = MemoryStorage::new();
        let mut prefs = Preferences::load(&storage).unwrap();

        assert!(prefs.toggle_dark_mode(&storage).unwrap());
        assert_eq!(storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert!(Preferences::load(&storage).unwrap().dark_mode);

        assert!(!prefs.toggle_dark_mode(&storage).unwrap());
        assert!(!Preferences::load(&storage).unwrap().dark_mode);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set(DARK_MODE_KEY, "maybe").unwrap();
        assert_eq!(Preferences::load(&storage).unwrap(), Preferences::default());
    }
}
