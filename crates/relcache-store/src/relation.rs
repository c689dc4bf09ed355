//! The bidirectional reference graph kept alongside the primary item map.
//!
//! [`RelationGraph`] owns one [`Relation`] record per key that has been
//! stored or referenced. It performs no locking of its own: the store holds
//! it behind the same `RwLock` as the items so that both change together.
//!
//! # Invariants
//!
//! - `b ∈ relations[a].referenced` iff `a ∈ relations[b].refers`.
//! - A key's `refers` set is only ever replaced wholesale by [`link`].
//!
//! [`link`]: RelationGraph::link

use std::collections::{HashMap, HashSet};

use crate::error::{RelationError, RelationResult};

/// Forward and backward edge sets for a single key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relation {
    /// Keys this key's current item points to.
    pub refers: HashSet<String>,
    /// Keys whose current items point to this key.
    pub referenced: HashSet<String>,
}

impl Relation {
    /// Returns `true` if the record carries no edges in either direction.
    pub fn is_detached(&self) -> bool {
        self.refers.is_empty() && self.referenced.is_empty()
    }
}

/// Adjacency index over string keys.
///
/// A record created only because another key referenced it is kept even
/// after its last edge goes away; it is dropped only by deleting a stored
/// item under that key or by replacing the store. Items whose references
/// keep pointing at fresh keys therefore grow the index.
#[derive(Clone, Debug, Default)]
pub struct RelationGraph {
    relations: HashMap<String, Relation>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph pre-sized for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            relations: HashMap::with_capacity(capacity),
        }
    }

    /// Number of relation records.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` if there are no relation records.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Relation record for `key`, if one exists.
    pub fn get(&self, key: &str) -> Option<&Relation> {
        self.relations.get(key)
    }

    /// Set `key`'s forward edges to `refers` and add the matching backward
    /// edges, creating target records on first sight.
    ///
    /// Any previous forward edges of `key` must already have been removed
    /// with [`unlink`](Self::unlink).
    pub fn link<I>(&mut self, key: &str, refers: I)
    where
        I: IntoIterator<Item = String>,
    {
        let refers: HashSet<String> = refers.into_iter().collect();
        for target in &refers {
            self.relations
                .entry(target.clone())
                .or_default()
                .referenced
                .insert(key.to_string());
        }
        self.relations.entry(key.to_string()).or_default().refers = refers;
    }

    /// Drop every forward edge of `key` along with the backward edges it
    /// contributed. The record itself, and who references `key`, is kept.
    pub fn unlink(&mut self, key: &str) {
        let Some(relation) = self.relations.get_mut(key) else {
            return;
        };
        let refers = std::mem::take(&mut relation.refers);
        for target in &refers {
            if let Some(target_relation) = self.relations.get_mut(target) {
                target_relation.referenced.remove(key);
            }
        }
    }

    /// Forget `key` as a referrer after its item was deleted.
    ///
    /// Backward edges held by other live items survive; the record is
    /// discarded once nothing points at `key` any more.
    pub fn remove(&mut self, key: &str) {
        self.unlink(key);
        if self.relations.get(key).is_some_and(Relation::is_detached) {
            self.relations.remove(key);
        }
    }

    /// Check edge symmetry, and that every referrer is a stored item.
    pub fn verify<F>(&self, is_stored: F) -> RelationResult<()>
    where
        F: Fn(&str) -> bool,
    {
        for (key, relation) in &self.relations {
            if !relation.refers.is_empty() && !is_stored(key) {
                return Err(RelationError::InvariantViolated {
                    key: key.clone(),
                    referrer: key.clone(),
                });
            }
            for target in &relation.refers {
                let mirrored = self
                    .relations
                    .get(target)
                    .is_some_and(|r| r.referenced.contains(key));
                if !mirrored {
                    return Err(RelationError::InvariantViolated {
                        key: target.clone(),
                        referrer: key.clone(),
                    });
                }
            }
            for referrer in &relation.referenced {
                let mirrored = self
                    .relations
                    .get(referrer)
                    .is_some_and(|r| r.refers.contains(key));
                if !mirrored || !is_stored(referrer) {
                    return Err(RelationError::InvariantViolated {
                        key: key.clone(),
                        referrer: referrer.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn refs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn link_creates_target_records() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b", "c"]));

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("a").unwrap().refers, keys(&["b", "c"]));
        assert_eq!(graph.get("b").unwrap().referenced, keys(&["a"]));
        assert_eq!(graph.get("c").unwrap().referenced, keys(&["a"]));
        assert!(graph.get("b").unwrap().refers.is_empty());
    }

    #[test]
    fn link_collapses_duplicate_targets() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b", "b"]));
        assert_eq!(graph.get("a").unwrap().refers.len(), 1);
    }

    #[test]
    fn unlink_keeps_incoming_edges() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b"]));
        graph.link("b", refs(&["c"]));

        graph.unlink("b");
        let b = graph.get("b").unwrap();
        assert!(b.refers.is_empty());
        assert_eq!(b.referenced, keys(&["a"]));
        assert!(graph.get("c").unwrap().referenced.is_empty());
    }

    #[test]
    fn unlink_missing_key_is_noop() {
        let mut graph = RelationGraph::new();
        graph.unlink("ghost");
        assert!(graph.is_empty());
    }

    #[test]
    fn remove_discards_detached_record() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b"]));
        graph.remove("a");
        assert!(graph.get("a").is_none());
        assert!(graph.get("b").unwrap().referenced.is_empty());
    }

    #[test]
    fn remove_keeps_record_still_referenced() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b"]));
        graph.link("b", Vec::new());
        graph.remove("b");
        assert_eq!(graph.get("b").unwrap().referenced, keys(&["a"]));
    }

    #[test]
    fn retargeted_references_leave_detached_records() {
        let mut graph = RelationGraph::new();
        for i in 0..10 {
            graph.unlink("a");
            graph.link("a", vec![format!("t{i}")]);
        }
        graph.remove("a");

        assert!(graph.get("a").is_none());
        assert_eq!(graph.len(), 10);
        assert!(graph.get("t0").unwrap().is_detached());
    }

    #[test]
    fn self_reference_round_trip() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["a"]));
        assert_eq!(graph.get("a").unwrap().referenced, keys(&["a"]));
        graph.remove("a");
        assert!(graph.is_empty());
    }

    #[test]
    fn verify_accepts_consistent_graph() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b", "c"]));
        graph.link("b", refs(&["a"]));
        assert!(graph.verify(|k| k == "a" || k == "b").is_ok());
    }

    #[test]
    fn verify_rejects_unstored_referrer() {
        let mut graph = RelationGraph::new();
        graph.link("a", refs(&["b"]));
        let err = graph.verify(|k| k == "b").unwrap_err();
        assert!(matches!(err, RelationError::InvariantViolated { .. }));
    }
}
