//! Thread-safe keyed storage with a weak reference graph.
//!
//! Every stored item lives under a string key. A user-supplied,
//! deterministic function derives the keys an item refers to, and the store
//! keeps forward (`refers`) and backward (`referenced`) edges in step with
//! the items as they are added, updated, and deleted.
//!
//! References are weak: an item may refer to keys that hold nothing yet, and
//! deleting a referenced item never fails or cascades. Its referrers keep a
//! dangling forward edge, and pick the item back up if it is re-added.
//!
//! # Storage Backends
//!
//! All backends implement the [`RelationStore`] trait:
//!
//! - [`ThreadSafeRelationStore`] -- `HashMap`-based store behind one `RwLock`
//!
//! # Design Rules
//!
//! 1. Items and the relation graph are one consistency domain under one lock.
//! 2. Forward edges are only rebuilt from the derivation function, wholesale.
//! 3. Derivation runs before any state is touched; failures mutate nothing.
//! 4. Cycles and dangling references are legal data.
//! 5. Enumeration order is unspecified.

pub mod config;
pub mod error;
pub mod memory;
pub mod relation;
pub mod traits;

pub use config::StoreConfig;
pub use error::{BoxError, RelationError, RelationResult};
pub use memory::ThreadSafeRelationStore;
pub use relation::{Relation, RelationGraph};
pub use traits::RelationStore;
