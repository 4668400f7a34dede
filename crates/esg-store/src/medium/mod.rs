//! Durable key/value media.
//!
//! The store only needs string-keyed get/set/delete plus key enumeration.
//! Keys are opaque to the medium.

mod file;
mod memory;

use std::io;
use std::sync::Arc;

pub use file::FileMedium;
pub use memory::MemoryMedium;

/// A synchronous string-keyed key/value medium.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Delete the entry under `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> io::Result<()>;

    /// All keys currently stored.
    fn keys(&self) -> io::Result<Vec<String>>;
}

impl<T: StorageMedium + ?Sized> StorageMedium for Arc<T> {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        (**self).keys()
    }
}
