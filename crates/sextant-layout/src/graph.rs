use crate::error::{Error, Result};
use crate::model::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;
use sextant_geom::Size;

/// Index-based view of a validated [`LayoutGraph`].
#[derive(Debug, Clone)]
pub(crate) struct IndexedGraph {
    pub sizes: Vec<Size>,
    pub edges: Vec<(usize, usize)>,
}

impl IndexedGraph {
    pub(crate) fn build(graph: &LayoutGraph) -> Result<Self> {
        let mut index: HashMap<&str, usize> = HashMap::default();
        let mut sizes = Vec::with_capacity(graph.nodes.len());
        for (i, n) in graph.nodes.iter().enumerate() {
            if !(n.width.is_finite() && n.height.is_finite()) || n.width < 0.0 || n.height < 0.0 {
                return Err(Error::InvalidNodeSize {
                    node_id: n.id.clone(),
                });
            }
            if index.insert(n.id.as_str(), i).is_some() {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
            sizes.push(Size::new(n.width, n.height));
        }

        let lookup = |edge_id: &str, node_id: &str| {
            index
                .get(node_id)
                .copied()
                .ok_or_else(|| Error::MissingEndpoint {
                    edge_id: edge_id.to_string(),
                    node_id: node_id.to_string(),
                })
        };
        let edges = graph
            .edges
            .iter()
            .map(|e| Ok((lookup(&e.id, &e.source)?, lookup(&e.id, &e.target)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sizes, edges })
    }
}
