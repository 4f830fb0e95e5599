//! Cycle breaking by reversing a depth-first feedback arc set.
//!
//! Nodes are visited in index order and their out-edges in input order. An edge that reaches a
//! node still on the DFS stack closes a cycle and is marked for reversal. Reversing every marked
//! edge leaves the graph acyclic. Self-loops are never marked; callers drop them instead.

/// Returns, per edge, whether it belongs to the feedback arc set.
pub fn feedback_edges(node_count: usize, edges: &[(usize, usize)]) -> Vec<bool> {
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (e, &(u, v)) in edges.iter().enumerate() {
        if u != v {
            out_edges[u].push(e);
        }
    }

    let mut reversed = vec![false; edges.len()];
    let mut visited = vec![false; node_count];
    let mut on_stack = vec![false; node_count];
    // (node, index of the next out-edge to follow)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_stack[root] = true;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            let Some(&e) = out_edges[u].get(next) else {
                on_stack[u] = false;
                stack.pop();
                continue;
            };
            top.1 += 1;
            let v = edges[e].1;
            if on_stack[v] {
                reversed[e] = true;
            } else if !visited[v] {
                visited[v] = true;
                on_stack[v] = true;
                stack.push((v, 0));
            }
        }
    }
    reversed
}

/// Edges with every feedback edge flipped.
pub fn orient(edges: &[(usize, usize)], reversed: &[bool]) -> Vec<(usize, usize)> {
    edges
        .iter()
        .zip(reversed)
        .map(|(&(u, v), &r)| if r { (v, u) } else { (u, v) })
        .collect()
}
