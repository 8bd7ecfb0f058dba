use crate::{PrefStore, PrefValue, Result};
use tracing::{debug, warn};

/// A named, typed slot in a preference store, with a fallback default.
///
/// The preference owns its key and default value but not the store: it holds a
/// handle, and every preference built on the same store with the same key reads
/// and writes the same slot.
///
/// ```
/// use typed_prefs::{MemoryStore, PrefStore, TypedPreference};
///
/// let store = MemoryStore::new();
/// let launch_count = TypedPreference::new(store.clone(), "launchCount", 0i64);
///
/// assert_eq!(0, launch_count.get());
/// launch_count.set(5).unwrap();
/// assert_eq!(5, launch_count.get());
///
/// launch_count.reset().unwrap();
/// assert_eq!(0, launch_count.get());
///
/// launch_count.remove().unwrap();
/// assert_eq!(0, launch_count.get());
/// assert!(!store.contains("launchCount").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TypedPreference<T, S> {
    key: String,
    default_value: T,
    store: S,
}

impl<T, S> TypedPreference<T, S>
where
    T: PrefValue + Clone,
    S: PrefStore,
{
    /// bind a preference to key in store. The store is not touched.
    pub fn new(store: S, key: impl Into<String>, default_value: T) -> Self {
        Self {
            key: key.into(),
            default_value,
            store,
        }
    }

    /// the key of the slot
    pub fn key(&self) -> &str {
        &self.key
    }

    /// the value `get` falls back to
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// the store this preference reads and writes
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current value of the slot.
    ///
    /// Returns the default when nothing is stored, when the stored value has a
    /// different type than `T`, or when the store cannot be read. Use
    /// [`try_get`](Self::try_get) to tell these cases apart.
    pub fn get(&self) -> T {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => T::from_raw(&raw).unwrap_or_else(|| {
                debug!(key = %self.key, stored = raw.type_name(), "stored value has another type");
                self.default_value.clone()
            }),
            Ok(None) => self.default_value.clone(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read preference");
                self.default_value.clone()
            }
        }
    }

    /// Stored value of the slot, without falling back to the default.
    ///
    /// `Ok(None)` when nothing is stored or the stored value is not a `T`.
    pub fn try_get(&self) -> Result<Option<T>> {
        Ok(self.store.read(&self.key)?.and_then(|raw| T::from_raw(&raw)))
    }

    /// overwrite the slot with value
    pub fn set(&self, value: T) -> Result<()> {
        self.store.write(&self.key, value.into_raw())
    }

    /// store the default value in the slot
    ///
    /// unlike `remove`, this leaves an entry behind
    pub fn reset(&self) -> Result<()> {
        self.set(self.default_value.clone())
    }

    /// delete the slot from the store, no-op if absent
    pub fn remove(&self) -> Result<()> {
        self.store.delete(&self.key)
    }

    /// whether the slot holds anything, whatever its type
    pub fn is_set(&self) -> bool {
        self.store.contains(&self.key).unwrap_or(false)
    }
}
