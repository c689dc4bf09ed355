use serde::{Deserialize, Serialize};

use crate::error::{RelationError, RelationResult};

/// Construction-time tuning for a relation store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of items the primary map is pre-sized for.
    pub initial_capacity: usize,
    /// Number of relation records the graph is pre-sized for.
    pub relation_capacity: usize,
}

impl StoreConfig {
    /// Parse a config from a TOML fragment. Missing fields take defaults.
    pub fn from_toml_str(input: &str) -> RelationResult<Self> {
        toml::from_str(input).map_err(|e| RelationError::Config(e.to_string()))
    }

    /// Pre-size both maps for roughly `items` stored objects.
    pub fn with_capacity(items: usize) -> Self {
        Self {
            initial_capacity: items,
            relation_capacity: items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.initial_capacity, 0);
        assert_eq!(c.relation_capacity, 0);
    }

    #[test]
    fn parse_partial_toml() {
        let c = StoreConfig::from_toml_str("initial_capacity = 128\n").unwrap();
        assert_eq!(c.initial_capacity, 128);
        assert_eq!(c.relation_capacity, 0);
    }

    #[test]
    fn parse_empty_toml() {
        let c = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(c, StoreConfig::default());
    }

    #[test]
    fn parse_invalid_toml() {
        let err = StoreConfig::from_toml_str("initial_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, RelationError::Config(_)));
    }

    #[test]
    fn with_capacity_sizes_both_maps() {
        let c = StoreConfig::with_capacity(64);
        assert_eq!(c.initial_capacity, 64);
        assert_eq!(c.relation_capacity, 64);
    }
}
