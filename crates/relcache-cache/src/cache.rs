//! [`KeyedCache`]: a value-addressed front for [`ThreadSafeRelationStore`].

use std::collections::HashMap;
use std::fmt;

use relcache_store::{BoxError, RelationStore, StoreConfig, ThreadSafeRelationStore};
use tracing::trace;

use crate::error::{CacheError, CacheResult};
use crate::traits::Cache;

type KeyFn<T> = Box<dyn Fn(&T) -> Result<String, BoxError> + Send + Sync>;

/// Cache that derives each value's key with a user-supplied function and
/// delegates to a [`ThreadSafeRelationStore`].
pub struct KeyedCache<T> {
    store: ThreadSafeRelationStore<T>,
    key_fn: KeyFn<T>,
}

impl<T> KeyedCache<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    /// Create an empty cache.
    ///
    /// Both functions must be deterministic: `key_fn` names a value,
    /// `refer_fn` lists the keys it points to.
    pub fn new<K, KE, R, RE>(key_fn: K, refer_fn: R) -> Self
    where
        K: Fn(&T) -> Result<String, KE> + Send + Sync + 'static,
        KE: Into<BoxError>,
        R: Fn(&T) -> Result<Vec<String>, RE> + Send + Sync + 'static,
        RE: Into<BoxError>,
    {
        Self::with_config(StoreConfig::default(), key_fn, refer_fn)
    }

    /// Create an empty cache whose store is sized according to `config`.
    pub fn with_config<K, KE, R, RE>(config: StoreConfig, key_fn: K, refer_fn: R) -> Self
    where
        K: Fn(&T) -> Result<String, KE> + Send + Sync + 'static,
        KE: Into<BoxError>,
        R: Fn(&T) -> Result<Vec<String>, RE> + Send + Sync + 'static,
        RE: Into<BoxError>,
    {
        Self {
            store: ThreadSafeRelationStore::with_config(config, refer_fn),
            key_fn: Box::new(move |item: &T| key_fn(item).map_err(Into::into)),
        }
    }

    /// The underlying relation store.
    pub fn store(&self) -> &ThreadSafeRelationStore<T> {
        &self.store
    }

    /// Derive the key for `item`.
    pub fn key_of(&self, item: &T) -> CacheResult<String> {
        let key = (self.key_fn)(item).map_err(|source| CacheError::Key {
            value: format!("{item:?}"),
            source,
        })?;
        if key.is_empty() {
            return Err(CacheError::Key {
                value: format!("{item:?}"),
                source: "key function returned an empty key".into(),
            });
        }
        Ok(key)
    }

    fn keyed(&self, items: Vec<T>) -> CacheResult<HashMap<String, T>> {
        let keyed = items
            .into_iter()
            .map(|item| -> CacheResult<(String, T)> { Ok((self.key_of(&item)?, item)) })
            .collect::<CacheResult<HashMap<_, _>>>()?;
        trace!(items = keyed.len(), "derived keys for replace");
        Ok(keyed)
    }
}

impl<T> Cache<T> for KeyedCache<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    fn add(&self, item: T) -> CacheResult<()> {
        let key = self.key_of(&item)?;
        Ok(self.store.add(&key, item)?)
    }

    fn update(&self, item: T) -> CacheResult<()> {
        let key = self.key_of(&item)?;
        Ok(self.store.update(&key, item)?)
    }

    fn delete(&self, item: &T) -> CacheResult<()> {
        let key = self.key_of(item)?;
        Ok(self.store.delete(&key)?)
    }

    fn get(&self, item: &T) -> CacheResult<Option<T>> {
        let key = self.key_of(item)?;
        self.get_by_key(&key)
    }

    fn get_by_key(&self, key: &str) -> CacheResult<Option<T>> {
        Ok(self.store.get(key)?)
    }

    fn list(&self) -> CacheResult<Vec<T>> {
        Ok(self.store.list()?)
    }

    fn list_keys(&self) -> CacheResult<Vec<String>> {
        Ok(self.store.list_keys()?)
    }

    fn replace(&self, items: Vec<T>) -> CacheResult<()> {
        let keyed = self.keyed(items)?;
        Ok(self.store.replace(keyed)?)
    }

    fn replace_and_rebuild(&self, items: Vec<T>) -> CacheResult<()> {
        let keyed = self.keyed(items)?;
        Ok(self.store.replace_and_rebuild(keyed)?)
    }

    fn referenced(&self, item: &T) -> CacheResult<Vec<T>> {
        let key = self.key_of(item)?;
        Ok(self.store.referenced(&key)?)
    }

    fn referenced_keys(&self, key: &str) -> CacheResult<Vec<String>> {
        Ok(self.store.referenced_keys(key)?)
    }

    fn refer_keys(&self, key: &str) -> CacheResult<Vec<String>> {
        Ok(self.store.refer_keys(key)?)
    }
}

impl<T> fmt::Debug for KeyedCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
