//! The event collection.
//!
//! Events live in memory in insertion order. Every mutation starts from the
//! latest stored snapshot and writes the full result back before it shows up
//! in memory, so several tzcal processes can share one data directory.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::constants::EVENTS_KEY;
use crate::error::{TzCalError, TzCalResult};
use crate::event::{Event, EventDraft};
use crate::storage::Storage;

/// Store shared between the CLI and the reminder task.
pub type SharedStore = Arc<Mutex<EventStore>>;

pub struct EventStore {
    storage: Arc<dyn Storage>,
    events: Vec<Event>,
    /// Ids marked notified by this store, kept even when saving failed
    notified: HashSet<i64>,
}

impl EventStore {
    /// Load the snapshot from storage. A missing snapshot is an empty store.
    pub fn open(storage: Arc<dyn Storage>) -> TzCalResult<Self> {
        let events = read_snapshot(storage.as_ref())?;
        Ok(EventStore {
            storage,
            events,
            notified: HashSet::new(),
        })
    }

    /// Replace the in-memory events with the stored snapshot, picking up
    /// changes written by other processes.
    pub fn reload(&mut self) -> TzCalResult<()> {
        self.events = self.latest()?;
        Ok(())
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Create an event from a draft. Title, date and time must be filled in;
    /// the timezone is taken as given.
    pub fn add(&mut self, draft: EventDraft) -> TzCalResult<Event> {
        self.add_at(draft, Utc::now())
    }

    pub fn add_at(&mut self, draft: EventDraft, now: DateTime<Utc>) -> TzCalResult<Event> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(TzCalError::Validation(missing.join(", ")));
        }

        let mut events = self.latest()?;
        let event = Event {
            id: next_id(&events, now),
            title: draft.title.trim().to_string(),
            date: draft.date.trim().to_string(),
            time: draft.time.trim().to_string(),
            timezone: draft.timezone,
            created_at: now,
            notified: false,
        };

        events.push(event.clone());
        self.commit(events)?;

        tracing::debug!(id = event.id, title = %event.title, "Event added");
        Ok(event)
    }

    /// Remove an event. Unknown ids are ignored.
    pub fn remove(&mut self, id: i64) -> TzCalResult<()> {
        let mut events = self.latest()?;
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() == before {
            self.events = events;
            return Ok(());
        }

        self.commit(events)?;
        tracing::debug!(id, "Event removed");
        Ok(())
    }

    /// Flag an event as reminded. The flag never goes back to false, not even
    /// when saving it fails.
    pub fn mark_notified(&mut self, id: i64) -> TzCalResult<()> {
        self.notified.insert(id);
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.notified = true;
        }

        let stored = read_snapshot(self.storage.as_ref())?;
        let needs_write = stored.iter().any(|e| e.id == id && !e.notified);
        let events = self.with_notified(stored);

        if !needs_write {
            self.events = events;
            return Ok(());
        }

        self.commit(events)
    }

    /// The stored snapshot with this store's notified flags applied.
    fn latest(&self) -> TzCalResult<Vec<Event>> {
        Ok(self.with_notified(read_snapshot(self.storage.as_ref())?))
    }

    fn with_notified(&self, mut events: Vec<Event>) -> Vec<Event> {
        for event in &mut events {
            if self.notified.contains(&event.id) {
                event.notified = true;
            }
        }
        events
    }

    /// Save `events`, then make them the in-memory state. On error nothing
    /// in memory changes.
    fn commit(&mut self, events: Vec<Event>) -> TzCalResult<()> {
        let content =
            serde_json::to_string(&events).map_err(|e| TzCalError::Serialization(e.to_string()))?;
        self.storage.set(EVENTS_KEY, &content)?;
        self.events = events;
        Ok(())
    }
}

fn read_snapshot(storage: &dyn Storage) -> TzCalResult<Vec<Event>> {
    match storage.get(EVENTS_KEY)? {
        Some(content) => serde_json::from_str(&content)
            .map_err(|e| TzCalError::Serialization(format!("Could not read saved events: {}", e))),
        None => Ok(Vec::new()),
    }
}

/// Time-derived id, strictly greater than every id in `events`.
fn next_id(events: &[Event], now: DateTime<Utc>) -> i64 {
    let candidate = now.timestamp_millis();
    match events.iter().map(|e| e.id).max() {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TestStorage};
    use chrono::TimeZone;
    use std::sync::atomic::Ordering;

    fn draft(title: &str) -> EventDraft {
        EventDraft::new(title, "2025-03-20", "15:00", "Japan/Tokyo")
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 19, 10, 0, 0).unwrap()
    }

    fn open_memory() -> (Arc<MemoryStorage>, EventStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = EventStore::open(storage.clone()).unwrap();
        (storage, store)
    }

    #[test]
    fn add_assigns_fields_and_persists() {
        let (storage, mut store) = open_memory();

        let event = store.add_at(draft("Standup"), now()).unwrap();

        assert_eq!(event.id, now().timestamp_millis());
        assert_eq!(event.created_at, now());
        assert!(!event.notified);
        assert_eq!(store.list(), &[event.clone()]);

        let saved: Vec<Event> =
            serde_json::from_str(&storage.get(EVENTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved, vec![event]);
    }

    #[test]
    fn add_rejects_missing_fields_without_mutation() {
        let (storage, mut store) = open_memory();

        for bad in [
            EventDraft::new("", "2025-03-20", "15:00", "Japan/Tokyo"),
            EventDraft::new("Standup", "", "15:00", "Japan/Tokyo"),
            EventDraft::new("Standup", "2025-03-20", " ", "Japan/Tokyo"),
        ] {
            let result = store.add_at(bad, now());
            assert!(matches!(result, Err(TzCalError::Validation(_))));
        }

        assert!(store.is_empty());
        assert_eq!(storage.get(EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn add_accepts_unknown_zone() {
        let (_, mut store) = open_memory();
        let event = store
            .add_at(EventDraft::new("Launch", "2025-03-20", "15:00", "Mars/Olympus"), now())
            .unwrap();
        assert_eq!(event.timezone, "Mars/Olympus");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let (_, mut store) = open_memory();

        let a = store.add_at(draft("a"), now()).unwrap();
        let b = store.add_at(draft("b"), now()).unwrap();
        let c = store.add_at(draft("c"), now() - chrono::Duration::seconds(5)).unwrap();

        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let (_, mut store) = open_memory();
        store.add_at(draft("first"), now()).unwrap();
        store.add_at(draft("second"), now()).unwrap();
        store.add_at(draft("third"), now()).unwrap();

        let titles: Vec<_> = store.list().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_deletes_and_ignores_unknown_ids() {
        let (_, mut store) = open_memory();
        let a = store.add_at(draft("a"), now()).unwrap();
        let b = store.add_at(draft("b"), now()).unwrap();

        store.remove(a.id).unwrap();
        assert_eq!(store.list(), &[b.clone()]);

        store.remove(a.id).unwrap();
        store.remove(12345).unwrap();
        assert_eq!(store.list(), &[b]);
    }

    #[test]
    fn mark_notified_is_monotone() {
        let (_, mut store) = open_memory();
        let event = store.add_at(draft("a"), now()).unwrap();

        store.mark_notified(event.id).unwrap();
        store.mark_notified(event.id).unwrap();
        store.mark_notified(999).unwrap();

        assert!(store.get(event.id).unwrap().notified);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let storage = Arc::new(MemoryStorage::new());

        let mut store = EventStore::open(storage.clone()).unwrap();
        let event = store.add_at(draft("Standup"), now()).unwrap();
        store.mark_notified(event.id).unwrap();
        drop(store);

        let reopened = EventStore::open(storage).unwrap();
        assert_eq!(reopened.list().len(), 1);
        assert!(reopened.list()[0].notified);
    }

    #[test]
    fn reload_picks_up_outside_changes() {
        let storage = Arc::new(MemoryStorage::new());
        let mut watcher = EventStore::open(storage.clone()).unwrap();

        let mut other = EventStore::open(storage.clone()).unwrap();
        let event = other.add_at(draft("Added elsewhere"), now()).unwrap();

        assert!(watcher.is_empty());
        watcher.reload().unwrap();
        assert_eq!(watcher.list(), &[event]);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(EVENTS_KEY, "{not json").unwrap();

        assert!(matches!(
            EventStore::open(storage),
            Err(TzCalError::Serialization(_))
        ));
    }

    #[test]
    fn stale_store_keeps_changes_made_elsewhere() {
        let storage = Arc::new(MemoryStorage::new());
        let mut stale = EventStore::open(storage.clone()).unwrap();

        let mut watcher = EventStore::open(storage.clone()).unwrap();
        let reminded = watcher.add_at(draft("Standup"), now()).unwrap();
        watcher.mark_notified(reminded.id).unwrap();

        let added = stale.add_at(draft("Lunch"), now()).unwrap();
        assert_eq!(stale.list().len(), 2);

        watcher.reload().unwrap();
        assert!(watcher.get(reminded.id).unwrap().notified);
        assert!(watcher.get(added.id).is_some());

        stale.remove(added.id).unwrap();
        watcher.reload().unwrap();
        assert_eq!(watcher.list().len(), 1);
        assert!(watcher.list()[0].notified);
    }

    #[test]
    fn failed_add_leaves_memory_untouched() {
        let storage = Arc::new(TestStorage::default());
        let mut store = EventStore::open(storage.clone()).unwrap();
        let kept = store.add_at(draft("kept"), now()).unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);
        assert!(matches!(store.add_at(draft("lost"), now()), Err(TzCalError::Io(_))));
        assert!(store.remove(kept.id).is_err());

        assert_eq!(store.list(), &[kept]);
    }

    #[test]
    fn notified_survives_failed_save_and_reload() {
        let storage = Arc::new(TestStorage::default());
        let mut store = EventStore::open(storage.clone()).unwrap();
        let event = store.add_at(draft("Standup"), now()).unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);
        assert!(store.mark_notified(event.id).is_err());
        assert!(store.get(event.id).unwrap().notified);

        store.reload().unwrap();
        assert!(store.get(event.id).unwrap().notified);

        // The next successful write carries the flag along
        storage.fail_writes.store(false, Ordering::SeqCst);
        store.add_at(draft("Later"), now()).unwrap();
        let reopened = EventStore::open(storage).unwrap();
        assert!(reopened.get(event.id).unwrap().notified);
    }
}
