//! Value-keyed cache with weak reference tracking.
//!
//! [`KeyedCache`] turns values into keys with a user-supplied function and
//! forwards every call to a [`ThreadSafeRelationStore`]. Callers work with
//! whole values; the store keeps the reference graph between them.
//!
//! ```
//! use std::convert::Infallible;
//! use relcache_cache::{Cache, KeyedCache};
//!
//! #[derive(Clone, Debug)]
//! struct Pod { name: String, volumes: Vec<String> }
//!
//! let cache: KeyedCache<Pod> = KeyedCache::new(
//!     |p: &Pod| Ok::<_, Infallible>(p.name.clone()),
//!     |p: &Pod| Ok::<_, Infallible>(p.volumes.clone()),
//! );
//! cache.add(Pod { name: "web".into(), volumes: vec!["data".into()] }).unwrap();
//! assert_eq!(cache.referenced_keys("data").unwrap(), vec!["web".to_string()]);
//! ```
//!
//! # Modules
//!
//! - [`error`] — Error types for cache operations
//! - [`traits`] — The [`Cache`] trait defining the value-based interface
//! - [`cache`] — [`KeyedCache`], the store-backed implementation
//!
//! [`ThreadSafeRelationStore`]: relcache_store::ThreadSafeRelationStore

pub mod cache;
pub mod error;
pub mod traits;

pub use cache::KeyedCache;
pub use error::{CacheError, CacheResult};
pub use traits::Cache;

pub use relcache_store::{BoxError, RelationError, StoreConfig};
