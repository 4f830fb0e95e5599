//! Node ordering / crossing reduction.
//!
//! Layers are seeded in node index order and then swept with the barycenter heuristic: a
//! top-down pass orders each layer by the mean position of its predecessors, a bottom-up pass by
//! the mean position of its successors. The heuristic is not exact; it runs at most
//! [`MAX_ITERATIONS`] bidirectional passes and stops early once a whole pass leaves every layer
//! unchanged.

mod barycenter;
mod cross_count;

pub use barycenter::{barycenter_order, reorder_layer};
pub use cross_count::cross_count;

pub const MAX_ITERATIONS: usize = 24;

/// Groups nodes into layers by rank, each layer sorted by node index. Empty ranks are skipped.
pub fn init_layers(ranks: &[usize]) -> Vec<Vec<usize>> {
    let Some(&max_rank) = ranks.iter().max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (v, &r) in ranks.iter().enumerate() {
        layers[r].push(v);
    }
    layers.retain(|layer| !layer.is_empty());
    layers
}

/// Reorders `layers` in place to reduce crossings among `segments`.
///
/// `node_count` must cover every node index referenced by `layers` and `segments`. Returns the
/// number of bidirectional passes that ran.
pub fn reduce_crossings(
    layers: &mut [Vec<usize>],
    segments: &[(usize, usize)],
    node_count: usize,
) -> usize {
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(u, v) in segments {
        if u == v {
            continue;
        }
        succs[u].push(v);
        preds[v].push(u);
    }

    let mut position = vec![0usize; node_count];
    for layer in layers.iter() {
        for (i, &v) in layer.iter().enumerate() {
            position[v] = i;
        }
    }

    if layers.len() < 2 {
        return 0;
    }

    let mut passes = 0;
    for _ in 0..MAX_ITERATIONS {
        passes += 1;
        let mut changed = false;
        for r in 1..layers.len() {
            changed |= reorder_layer(&mut layers[r], &preds, &mut position);
        }
        for r in (0..layers.len() - 1).rev() {
            changed |= reorder_layer(&mut layers[r], &succs, &mut position);
        }
        if !changed {
            break;
        }
    }
    tracing::trace!(passes, layers = layers.len(), "crossing reduction finished");
    passes
}
