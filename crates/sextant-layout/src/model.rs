//! Input graph, options and result types.
//!
//! These are plain values owned by the caller: the engine reads a [`LayoutGraph`] and returns a
//! fresh [`LayoutResult`] without keeping references to either.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sextant_geom::{Point, Rect};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutDirection {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    /// Ranks advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Ranks advance towards decreasing coordinates.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    /// Gap between neighbouring nodes of the same rank.
    pub node_separation: f64,
    /// Gap between consecutive ranks.
    pub rank_separation: f64,
    pub align_to_grid: bool,
    pub grid_size: f64,
    pub margin: f64,
    /// Animation hints for the rendering side; the engine does not read them.
    pub animate: bool,
    pub animation_duration_ms: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::TopToBottom,
            node_separation: 50.0,
            rank_separation: 80.0,
            align_to_grid: false,
            grid_size: 10.0,
            margin: 20.0,
            animate: true,
            animation_duration_ms: 300,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("nodeSeparation", self.node_separation),
            ("rankSeparation", self.rank_separation),
            ("margin", self.margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption { name, value });
            }
        }
        if self.align_to_grid && !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(Error::InvalidOption {
                name: "gridSize",
                value: self.grid_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Top-left corner. Ignored as input; [`LayoutResult::apply_to`] overwrites it.
    pub position: Point,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            position: Point::origin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl LayoutEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, width: f64, height: f64) -> &mut Self {
        self.nodes.push(LayoutNode::new(id, width, height));
        self
    }

    /// Adds an edge whose id is `"{source}->{target}"`.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let (source, target) = (source.into(), target.into());
        let id = format!("{source}->{target}");
        self.edges.push(LayoutEdge { id, source, target });
        self
    }

    /// Chains `ids` with edges, creating 0×0 nodes for ids that are not present yet.
    pub fn set_path(&mut self, ids: &[&str]) -> &mut Self {
        for id in ids {
            if !self.nodes.iter().any(|n| n.id == *id) {
                self.add_node(*id, 0.0, 0.0);
            }
        }
        for w in ids.windows(2) {
            self.add_edge(w[0], w[1]);
        }
        self
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub success: bool,
    /// Top-left corner per node id, in input order.
    pub positions: IndexMap<String, Point>,
    /// Center-to-center polyline per edge id, routed through virtual nodes.
    pub edge_paths: IndexMap<String, Vec<Point>>,
    pub ranks: IndexMap<String, usize>,
    pub bounds: Rect,
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl LayoutResult {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            success: false,
            positions: IndexMap::new(),
            edge_paths: IndexMap::new(),
            ranks: IndexMap::new(),
            bounds: Rect::zero(),
            error: Some(message),
            elapsed: Duration::ZERO,
        }
    }

    /// Writes the computed positions back into `graph`'s node descriptors.
    ///
    /// Nodes that are not part of this result are left untouched. Returns the number of nodes
    /// updated.
    pub fn apply_to(&self, graph: &mut LayoutGraph) -> usize {
        let mut updated = 0;
        for node in &mut graph.nodes {
            if let Some(p) = self.positions.get(&node.id) {
                node.position = *p;
                updated += 1;
            }
        }
        updated
    }
}
