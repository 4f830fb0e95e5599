/// Computes `(barycenter, node)` entries for `layer` and returns them sorted (stable) by
/// barycenter.
///
/// A node's barycenter is the mean `position` of its `neighbors`; nodes without neighbors keep
/// their current index so they stay roughly in place.
pub fn barycenter_order(
    layer: &[usize],
    neighbors: &[Vec<usize>],
    position: &[usize],
) -> Vec<(f64, usize)> {
    let mut entries: Vec<(f64, usize)> = layer
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let ns = &neighbors[v];
            let bc = if ns.is_empty() {
                i as f64
            } else {
                ns.iter().map(|&n| position[n] as f64).sum::<f64>() / ns.len() as f64
            };
            (bc, v)
        })
        .collect();
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    entries
}

/// Reorders one layer by barycenter and refreshes `position` for its nodes.
///
/// Returns whether the order changed.
pub fn reorder_layer(layer: &mut [usize], neighbors: &[Vec<usize>], position: &mut [usize]) -> bool {
    let sorted = barycenter_order(layer, neighbors, position);
    let changed = sorted.iter().map(|e| e.1).ne(layer.iter().copied());
    if changed {
        for (i, (_, v)) in sorted.into_iter().enumerate() {
            layer[i] = v;
            position[v] = i;
        }
    }
    changed
}
