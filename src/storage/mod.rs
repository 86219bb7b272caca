pub mod json;
pub mod memory;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;

use anyhow::Result;

/// Opaque key/value persistence for serialized review data.
///
/// Values are whole blobs: there is no sub-record addressing, so callers replace
/// the full value on every write.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key` in a single step
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
