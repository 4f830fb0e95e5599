//! Rank assignment (longest path, breadth-first).
//!
//! Cycles are broken first by flipping a depth-first feedback arc set ([`crate::acyclic`]).
//! Nodes without predecessors in the resulting DAG start at rank 0. Ranks are pushed forward
//! along edges; whenever a node's rank grows it is queued again so its successors see the new
//! value. This yields `rank(v) >= rank(u) + 1` for every edge `u -> v` that is not part of a
//! cycle, and `rank(u) >= rank(v) + 1` for the flipped ones.

use crate::acyclic;
use std::collections::VecDeque;

/// Assigns a rank to each node `0..node_count` from `(source, target)` index pairs.
///
/// Self-loops are ignored. Nodes that are never reached keep rank 0.
pub fn longest_path(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut ranks = vec![0usize; node_count];
    if node_count == 0 {
        return ranks;
    }

    let reversed = acyclic::feedback_edges(node_count, edges);
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut has_pred = vec![false; node_count];
    for (u, v) in acyclic::orient(edges, &reversed) {
        if u == v {
            continue;
        }
        succs[u].push(v);
        has_pred[v] = true;
    }

    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| !has_pred[v]).collect();
    let mut queued = vec![false; node_count];
    for &v in &queue {
        queued[v] = true;
    }

    while let Some(u) = queue.pop_front() {
        queued[u] = false;
        let next = ranks[u] + 1;
        for &v in &succs[u] {
            if next > ranks[v] {
                ranks[v] = next;
                if !queued[v] {
                    queued[v] = true;
                    queue.push_back(v);
                }
            }
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_with_a_long_side() {
        // a -> b -> c -> d, a -> d
        let ranks = longest_path(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn late_longer_path_is_propagated_to_successors() {
        // a -> b, a -> c, c -> b, b -> d: b is first seen at rank 1, then raised to 2.
        let ranks = longest_path(4, &[(0, 1), (0, 2), (2, 1), (1, 3)]);
        assert_eq!(ranks, vec![0, 2, 1, 3]);
    }

    #[test]
    fn pure_cycle_is_ranked_as_a_chain() {
        let ranks = longest_path(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(ranks, vec![0, 1, 2]);
    }
}
