//! Virtual-node insertion.
//!
//! Edges that span more than one rank are split into single-rank segments through zero-size
//! virtual nodes, so crossing reduction and positioning only ever deal with adjacent ranks.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Ranks for real nodes followed by ranks for the virtual nodes appended after them.
    pub ranks: Vec<usize>,
    /// Single-rank segments between real and/or virtual nodes. Self-loops produce none.
    pub segments: Vec<(usize, usize)>,
    /// Per input edge, the node sequence from source to target including virtual nodes.
    pub chains: Vec<Vec<usize>>,
}

impl Normalized {
    pub fn is_virtual(&self, node: usize, real_count: usize) -> bool {
        node >= real_count && node < self.ranks.len()
    }
}

pub fn split_long_edges(ranks: &[usize], edges: &[(usize, usize)]) -> Normalized {
    let mut out = Normalized {
        ranks: ranks.to_vec(),
        segments: Vec::with_capacity(edges.len()),
        chains: Vec::with_capacity(edges.len()),
    };

    for &(u, v) in edges {
        if u == v {
            out.chains.push(vec![u, u]);
            continue;
        }

        let (ru, rv) = (ranks[u], ranks[v]);
        let mut chain = vec![u];
        if rv > ru + 1 {
            let mut prev = u;
            for rank in (ru + 1)..rv {
                let dummy = out.ranks.len();
                out.ranks.push(rank);
                out.segments.push((prev, dummy));
                chain.push(dummy);
                prev = dummy;
            }
            out.segments.push((prev, v));
        } else {
            out.segments.push((u, v));
        }
        chain.push(v);
        out.chains.push(chain);
    }

    out
}
