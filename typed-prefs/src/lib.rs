#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//! This crate provides `TypedPreference`, a named slot in a Key-Value Store
//! that reads and writes values of one static type and falls back to a
//! default whenever the slot holds nothing usable.
//!
//! The store is any `PrefStore`: `MemoryStore` keeps everything in process,
//! `SledStore` persists it with a `sled::Db`.

mod error;
mod preference;
mod storage;
mod value;

#[macro_use]
extern crate failure;
pub use error::PrefError;
pub use error::PrefErrorKind;
pub use preference::TypedPreference;
pub use storage::{MemoryStore, PrefStore, SledStore};
pub use value::{PrefValue, RawValue};

/// Result type used by this crate
pub type Result<T> = core::result::Result<T, PrefError>;
