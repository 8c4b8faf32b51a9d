//! Key-value persistence for the event snapshot and preferences.
//!
//! Each key holds one JSON document. [`FileStorage`] keeps them as
//! `<key>.json` files in the data directory; [`MemoryStorage`] keeps them in a
//! map and is what tests use.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{TzCalError, TzCalResult};

pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> TzCalResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> TzCalResult<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> TzCalResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> TzCalResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write next to the target and rename so a crash never leaves half a file
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> TzCalResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| TzCalError::Serialization("storage lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TzCalResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| TzCalError::Serialization("storage lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Memory storage that counts reads and can be told to fail writes.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct TestStorage {
    inner: MemoryStorage,
    pub(crate) fail_writes: AtomicBool,
    pub(crate) reads: AtomicUsize,
}

#[cfg(test)]
impl Storage for TestStorage {
    fn get(&self, key: &str) -> TzCalResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> TzCalResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.set(key, value)
    }
}
