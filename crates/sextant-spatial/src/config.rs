use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuadTreeConfig {
    /// A leaf holding more items than this splits into four quadrants.
    pub max_items_per_node: usize,
    pub max_depth: usize,
    /// Quadrants whose half-width or half-height would not exceed this are never split.
    pub min_node_size: f64,
    /// Children holding this many items or fewer in total are folded back into their parent.
    pub merge_threshold: usize,
    /// Inserts plus removes after which the tree rebuilds itself.
    pub rebuild_threshold: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_items_per_node: 8,
            max_depth: 8,
            min_node_size: 16.0,
            merge_threshold: 4,
            rebuild_threshold: 4096,
        }
    }
}

impl QuadTreeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_items_per_node == 0 {
            return Err(Error::InvalidConfig {
                name: "maxItemsPerNode",
                value: 0.0,
            });
        }
        if !self.min_node_size.is_finite() || self.min_node_size < 0.0 {
            return Err(Error::InvalidConfig {
                name: "minNodeSize",
                value: self.min_node_size,
            });
        }
        // A freshly merged node must not be able to split again on the very next insert.
        if self.merge_threshold >= self.max_items_per_node {
            return Err(Error::InvalidConfig {
                name: "mergeThreshold",
                value: self.merge_threshold as f64,
            });
        }
        if self.rebuild_threshold == 0 {
            return Err(Error::InvalidConfig {
                name: "rebuildThreshold",
                value: 0.0,
            });
        }
        Ok(())
    }
}
