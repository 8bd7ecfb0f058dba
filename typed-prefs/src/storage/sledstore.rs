use super::PrefStore;
use crate::{RawValue, Result};
use std::path::Path;
use tracing::debug;

/// Persistent store, a wrapper around sled database.
///
/// Values are kept as json encoded `RawValue`s.
///
/// # Examples
/// ```
/// # use typed_prefs::{SledStore, PrefStore, RawValue};
/// # use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// // create and bind a SledStore to given working directory
/// let store = SledStore::open(dir.path()).unwrap();
/// store.write("theme", RawValue::String("dark".to_string())).unwrap();
///
/// assert_eq!(
///     Some(RawValue::String("dark".to_string())),
///     store.read("theme").unwrap()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// open a new instance binded to the given root directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::Config::new().path(path).open()?;

        Ok(Self { db })
    }

    /// create a new instance based on given sled database instance
    pub fn new(sled: sled::Db) -> Self {
        Self { db: sled }
    }

    /// all stored keys, in byte order
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = vec![];
        for entry in self.db.iter().keys() {
            let ivec = entry?;
            keys.push(String::from_utf8_lossy(&ivec).into_owned());
        }
        Ok(keys)
    }
}

impl PrefStore for SledStore {
    fn read(&self, key: &str) -> Result<Option<RawValue>> {
        match self.db.get(key)? {
            Some(ivec) => Ok(Some(serde_json::from_slice(&ivec)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: RawValue) -> Result<()> {
        let bytes = serde_json::to_vec(&value)?;
        self.db.insert(key, bytes)?;
        self.db.flush()?;
        debug!(key, kind = value.type_name(), "value written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if self.db.remove(key)?.is_some() {
            self.db.flush()?;
            debug!(key, "value removed");
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key)?)
    }
}
