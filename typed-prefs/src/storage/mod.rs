use crate::{RawValue, Result};
use std::sync::Arc;

mod memory;
mod sledstore;

pub use memory::MemoryStore;
pub use sledstore::SledStore;

/// PrefStore defines what a preference needs from
/// the Key-Value Store underneath it
pub trait PrefStore {
    /// get the raw value stored under key
    fn read(&self, key: &str) -> Result<Option<RawValue>>;

    /// store value under key, replacing any previous value
    fn write(&self, key: &str, value: RawValue) -> Result<()>;

    /// remove the value under key, does nothing if the key is absent
    fn delete(&self, key: &str) -> Result<()>;

    /// whether anything is stored under key
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<S: PrefStore + ?Sized> PrefStore for &S {
    fn read(&self, key: &str) -> Result<Option<RawValue>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: RawValue) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}

impl<S: PrefStore + ?Sized> PrefStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<RawValue>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: RawValue) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}
