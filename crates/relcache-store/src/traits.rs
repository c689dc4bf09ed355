use std::collections::HashMap;

use crate::error::RelationResult;

/// Keyed item storage with a weak reference graph between items.
///
/// Implementations must satisfy these invariants:
/// - Every mutation is atomic with respect to every other operation. No
///   caller observes the item map and the graph disagreeing.
/// - Deleting an item never fails because other items still refer to it.
///   Those items keep a dangling forward edge.
/// - A failed mutation leaves the store exactly as it was.
pub trait RelationStore<T>: Send + Sync {
    /// Insert or overwrite the item at `key` and rebuild its forward edges.
    fn add(&self, key: &str, item: T) -> RelationResult<()>;

    /// Same as [`add`](Self::add).
    fn update(&self, key: &str, item: T) -> RelationResult<()> {
        self.add(key, item)
    }

    /// Remove the item at `key`. Deleting a missing key is not an error.
    ///
    /// Only the item's own forward edges are dropped. If other stored items
    /// still refer to `key`, its record survives and
    /// [`referenced_keys`](Self::referenced_keys) keeps returning them
    /// rather than [`RelationNotFound`](crate::RelationError::RelationNotFound).
    fn delete(&self, key: &str) -> RelationResult<()>;

    /// Look up the item at `key`.
    fn get(&self, key: &str) -> RelationResult<Option<T>>;

    /// All stored items, in no particular order.
    fn list(&self) -> RelationResult<Vec<T>>;

    /// All stored keys, in no particular order.
    fn list_keys(&self) -> RelationResult<Vec<String>>;

    /// Swap in `items` wholesale and reset the graph to empty.
    ///
    /// Edges for the new items are not derived. Callers that need the graph
    /// must re-add items, or use [`replace_and_rebuild`](Self::replace_and_rebuild).
    fn replace(&self, items: HashMap<String, T>) -> RelationResult<()>;

    /// Swap in `items` wholesale and derive the full graph for them.
    fn replace_and_rebuild(&self, items: HashMap<String, T>) -> RelationResult<()>;

    /// Items whose forward edges include `key`.
    fn referenced(&self, key: &str) -> RelationResult<Vec<T>>;

    /// Keys whose forward edges include `key`.
    fn referenced_keys(&self, key: &str) -> RelationResult<Vec<String>>;

    /// Keys the item at `key` refers to.
    fn refer_keys(&self, key: &str) -> RelationResult<Vec<String>>;
}
