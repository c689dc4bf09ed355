//! The [`Cache`] trait defining the value-based cache interface.

use crate::error::CacheResult;

/// A weak-reference cache addressed by values rather than keys.
///
/// Every value-taking operation first derives the value's key. If that
/// fails, the call returns [`CacheError::Key`](crate::CacheError::Key) and
/// nothing is stored or removed.
pub trait Cache<T>: Send + Sync {
    /// Store `item` under its derived key.
    fn add(&self, item: T) -> CacheResult<()>;

    /// Same as [`add`](Self::add).
    fn update(&self, item: T) -> CacheResult<()>;

    /// Remove whatever is stored under `item`'s key.
    fn delete(&self, item: &T) -> CacheResult<()>;

    /// Look up the stored item sharing `item`'s key.
    fn get(&self, item: &T) -> CacheResult<Option<T>>;

    /// Look up the item stored under `key`.
    fn get_by_key(&self, key: &str) -> CacheResult<Option<T>>;

    /// All stored items, in no particular order.
    fn list(&self) -> CacheResult<Vec<T>>;

    /// All stored keys, in no particular order.
    fn list_keys(&self) -> CacheResult<Vec<String>>;

    /// Replace the whole contents with `items` and reset the reference graph.
    ///
    /// Keys are derived for every item before the store is touched; one
    /// failure aborts the whole call.
    fn replace(&self, items: Vec<T>) -> CacheResult<()>;

    /// Replace the whole contents with `items` and rebuild the reference
    /// graph for them.
    fn replace_and_rebuild(&self, items: Vec<T>) -> CacheResult<()>;

    /// Items that refer to `item`.
    fn referenced(&self, item: &T) -> CacheResult<Vec<T>>;

    /// Keys of items that refer to `key`.
    fn referenced_keys(&self, key: &str) -> CacheResult<Vec<String>>;

    /// Keys that the item under `key` refers to.
    fn refer_keys(&self, key: &str) -> CacheResult<Vec<String>>;
}
