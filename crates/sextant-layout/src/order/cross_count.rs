/// Counts pairwise crossings between segments joining adjacent layers.
///
/// Segments whose endpoints are not in adjacent layers (flat or back edges left over from
/// cycles) are ignored. Uses the accumulator-tree bilayer count, O(E log V) per layer pair.
pub fn cross_count(layers: &[Vec<usize>], segments: &[(usize, usize)]) -> usize {
    let node_count = layers
        .iter()
        .flat_map(|l| l.iter().copied())
        .max()
        .map_or(0, |m| m + 1);
    let mut layer_of = vec![usize::MAX; node_count];
    let mut position = vec![0usize; node_count];
    for (li, layer) in layers.iter().enumerate() {
        for (i, &v) in layer.iter().enumerate() {
            layer_of[v] = li;
            position[v] = i;
        }
    }

    let mut between: Vec<Vec<(usize, usize)>> = vec![Vec::new(); layers.len().saturating_sub(1)];
    for &(u, v) in segments {
        let (Some(&lu), Some(&lv)) = (layer_of.get(u), layer_of.get(v)) else {
            continue;
        };
        if lu == usize::MAX || lv == usize::MAX {
            continue;
        }
        if lv == lu + 1 {
            between[lu].push((position[u], position[v]));
        } else if lu == lv + 1 {
            between[lv].push((position[v], position[u]));
        }
    }

    let mut total = 0;
    for (li, mut pairs) in between.into_iter().enumerate() {
        pairs.sort_unstable();
        total += bilayer_cross_count(&pairs, layers[li + 1].len());
    }
    total
}

fn bilayer_cross_count(pairs: &[(usize, usize)], south_len: usize) -> usize {
    if south_len == 0 {
        return 0;
    }

    let mut first_index: usize = 1;
    while first_index < south_len {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree = vec![0usize; tree_size];

    let mut cc = 0;
    for &(_, south) in pairs {
        let mut index = south + first_index;
        tree[index] += 1;
        let mut weight_sum = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
