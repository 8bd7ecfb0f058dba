use super::PrefStore;
use crate::{RawValue, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory store, nothing survives the process.
///
/// Clones are handles onto the same map, so a clone handed to
/// one preference sees what another preference wrote.
///
/// ```
/// use typed_prefs::{MemoryStore, PrefStore, RawValue};
///
/// let store = MemoryStore::new();
/// let handle = store.clone();
///
/// store.write("volume", RawValue::Integer(7)).unwrap();
/// assert_eq!(Some(RawValue::Integer(7)), handle.read("volume").unwrap());
///
/// handle.delete("volume").unwrap();
/// assert!(store.is_empty().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, RawValue>>>,
}

impl MemoryStore {
    /// create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// number of stored keys
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read()?.len())
    }

    /// whether the store holds no keys at all
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.entries.read()?.is_empty())
    }

    /// all stored keys, in order
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read()?.keys().cloned().collect())
    }
}

impl PrefStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<RawValue>> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: RawValue) -> Result<()> {
        self.entries.write()?.insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write()?.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read()?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrefErrorKind, TypedPreference};
    use std::thread;

    // panic while holding the write lock
    fn poison(store: &MemoryStore) {
        let handle = store.clone();
        let res = thread::spawn(move || {
            let _guard = handle.entries.write().unwrap();
            panic!("writer died");
        })
        .join();
        assert!(res.is_err());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = MemoryStore::new();
        store.write("volume", RawValue::Integer(3)).unwrap();
        poison(&store);

        assert_eq!(
            store.read("volume").unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(
            store.write("volume", RawValue::Integer(4)).unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(
            store.delete("volume").unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(
            store.contains("volume").unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(store.len().unwrap_err().kind(), PrefErrorKind::LockPoisoned);
        assert_eq!(
            store.is_empty().unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(store.keys().unwrap_err().kind(), PrefErrorKind::LockPoisoned);
    }

    #[test]
    fn poisoned_lock_reads_as_default() {
        let store = MemoryStore::new();
        let pref = TypedPreference::new(&store, "volume", 7i64);
        pref.set(3).unwrap();
        poison(&store);

        assert_eq!(pref.get(), 7);
        assert!(!pref.is_set());
        assert_eq!(
            pref.try_get().unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
        assert_eq!(
            pref.set(9).unwrap_err().kind(),
            PrefErrorKind::LockPoisoned
        );
    }
}
