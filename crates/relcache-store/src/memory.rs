use std::collections::HashMap;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::error::{BoxError, RelationError, RelationResult};
use crate::relation::RelationGraph;
use crate::traits::RelationStore;

type ReferFn<T> = Box<dyn Fn(&T) -> Result<Vec<String>, BoxError> + Send + Sync>;

/// In-memory relation store guarded by a single `RwLock`.
///
/// Items and the relation graph form one consistency domain: mutations hold
/// the write guard for their whole duration, queries share the read guard.
/// Items are cloned out on read, so store `Arc<_>` values to share them.
pub struct ThreadSafeRelationStore<T> {
    refer_fn: ReferFn<T>,
    inner: RwLock<StoreState<T>>,
}

struct StoreState<T> {
    items: HashMap<String, T>,
    graph: RelationGraph,
}

impl<T> ThreadSafeRelationStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty store that derives references with `refer_fn`.
    ///
    /// `refer_fn` must be deterministic and free of side effects: it is the
    /// only source of an item's forward edges.
    pub fn new<F, E>(refer_fn: F) -> Self
    where
        F: Fn(&T) -> Result<Vec<String>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::with_config(StoreConfig::default(), refer_fn)
    }

    /// Create an empty store sized according to `config`.
    pub fn with_config<F, E>(config: StoreConfig, refer_fn: F) -> Self
    where
        F: Fn(&T) -> Result<Vec<String>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            refer_fn: Box::new(move |item: &T| refer_fn(item).map_err(Into::into)),
            inner: RwLock::new(StoreState {
                items: HashMap::with_capacity(config.initial_capacity),
                graph: RelationGraph::with_capacity(config.relation_capacity),
            }),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> RelationResult<usize> {
        Ok(self.read_state()?.items.len())
    }

    /// Returns `true` if no items are stored.
    pub fn is_empty(&self) -> RelationResult<bool> {
        Ok(self.read_state()?.items.is_empty())
    }

    /// Returns `true` if an item is stored at `key`.
    pub fn contains_key(&self, key: &str) -> RelationResult<bool> {
        Ok(self.read_state()?.items.contains_key(key))
    }

    /// Check the whole graph for asymmetric edges and referrers that are
    /// no longer stored.
    pub fn verify(&self) -> RelationResult<()> {
        let state = self.read_state()?;
        state.graph.verify(|key| state.items.contains_key(key))
    }

    fn derive(&self, key: &str, item: &T) -> RelationResult<Vec<String>> {
        let refers = (self.refer_fn)(item).map_err(|source| RelationError::DeriveReferences {
            key: key.to_string(),
            source,
        })?;
        if refers.iter().any(String::is_empty) {
            return Err(RelationError::DeriveReferences {
                key: key.to_string(),
                source: "derived an empty reference key".into(),
            });
        }
        Ok(refers)
    }

    fn read_state(&self) -> RelationResult<RwLockReadGuard<'_, StoreState<T>>> {
        self.inner
            .read()
            .map_err(|e| RelationError::LockPoisoned(e.to_string()))
    }

    fn write_state(&self) -> RelationResult<RwLockWriteGuard<'_, StoreState<T>>> {
        self.inner
            .write()
            .map_err(|e| RelationError::LockPoisoned(e.to_string()))
    }
}

impl<T> RelationStore<T> for ThreadSafeRelationStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn add(&self, key: &str, item: T) -> RelationResult<()> {
        if key.is_empty() {
            return Err(RelationError::EmptyKey);
        }
        let refers = self.derive(key, &item)?;
        let count = refers.len();

        let mut state = self.write_state()?;
        let replaced = state.items.insert(key.to_string(), item).is_some();
        state.graph.unlink(key);
        state.graph.link(key, refers);

        debug!(key, refers = count, replaced, "stored item");
        Ok(())
    }

    fn delete(&self, key: &str) -> RelationResult<()> {
        let mut state = self.write_state()?;
        if state.items.remove(key).is_none() {
            return Ok(());
        }
        state.graph.remove(key);

        debug!(key, "deleted item");
        Ok(())
    }

    fn get(&self, key: &str) -> RelationResult<Option<T>> {
        Ok(self.read_state()?.items.get(key).cloned())
    }

    fn list(&self) -> RelationResult<Vec<T>> {
        Ok(self.read_state()?.items.values().cloned().collect())
    }

    fn list_keys(&self) -> RelationResult<Vec<String>> {
        Ok(self.read_state()?.items.keys().cloned().collect())
    }

    fn replace(&self, items: HashMap<String, T>) -> RelationResult<()> {
        if items.keys().any(String::is_empty) {
            return Err(RelationError::EmptyKey);
        }
        let count = items.len();

        let mut state = self.write_state()?;
        state.items = items;
        state.graph = RelationGraph::new();

        debug!(items = count, "replaced items, relation graph reset");
        Ok(())
    }

    fn replace_and_rebuild(&self, items: HashMap<String, T>) -> RelationResult<()> {
        let mut graph = RelationGraph::with_capacity(items.len());
        for (key, item) in &items {
            if key.is_empty() {
                return Err(RelationError::EmptyKey);
            }
            let refers = self.derive(key, item)?;
            graph.link(key, refers);
        }
        let count = items.len();
        let relations = graph.len();

        let mut state = self.write_state()?;
        state.items = items;
        state.graph = graph;

        debug!(items = count, relations, "replaced items, relation graph rebuilt");
        Ok(())
    }

    fn referenced(&self, key: &str) -> RelationResult<Vec<T>> {
        let state = self.read_state()?;
        let relation = state
            .graph
            .get(key)
            .ok_or_else(|| RelationError::RelationNotFound {
                key: key.to_string(),
            })?;
        trace!(key, count = relation.referenced.len(), "resolving referrers");

        relation
            .referenced
            .iter()
            .map(|referrer| {
                state.items.get(referrer).cloned().ok_or_else(|| {
                    RelationError::InvariantViolated {
                        key: key.to_string(),
                        referrer: referrer.clone(),
                    }
                })
            })
            .collect()
    }

    fn referenced_keys(&self, key: &str) -> RelationResult<Vec<String>> {
        let state = self.read_state()?;
        let relation = state
            .graph
            .get(key)
            .ok_or_else(|| RelationError::RelationNotFound {
                key: key.to_string(),
            })?;
        Ok(relation.referenced.iter().cloned().collect())
    }

    fn refer_keys(&self, key: &str) -> RelationResult<Vec<String>> {
        let state = self.read_state()?;
        let relation = state
            .graph
            .get(key)
            .ok_or_else(|| RelationError::RelationNotFound {
                key: key.to_string(),
            })?;
        Ok(relation.refers.iter().cloned().collect())
    }
}

impl<T> fmt::Debug for ThreadSafeRelationStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ThreadSafeRelationStore");
        match self.inner.read() {
            Ok(state) => {
                out.field("item_count", &state.items.len());
                out.field("relation_count", &state.graph.len());
            }
            Err(_) => {
                out.field("poisoned", &true);
            }
        }
        out.finish()
    }
}
