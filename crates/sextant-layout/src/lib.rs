#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) layout for directed graphs.
//!
//! The pipeline breaks cycles ([`acyclic`]), assigns ranks ([`rank`]), inserts virtual nodes
//! ([`normalize`]), reduces crossings with barycenters ([`order`]) and assigns coordinates
//! ([`position`]), then rebuilds each edge as a polyline through node centers. Edges flipped to
//! break a cycle get their polyline flipped back.
//!
//! [`apply_layout`] never returns an error and never panics: invalid input and internal failures
//! are reported through [`LayoutResult::success`] and [`LayoutResult::error`].

pub mod acyclic;
pub mod error;
mod graph;
pub mod model;
pub mod normalize;
pub mod order;
pub mod position;
pub mod rank;

pub use error::{Error, Result};
pub use model::{
    LayoutDirection, LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, LayoutResult,
};
pub use sextant_geom::{Point, Rect};

use futures::future::{AbortRegistration, Abortable, Aborted};
use graph::IndexedGraph;
use indexmap::IndexMap;
use sextant_geom::{RectExt, point, rect};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `graph` according to `options`.
///
/// Always returns a result; check [`LayoutResult::success`]. `elapsed` is recorded for failed
/// runs too.
pub fn apply_layout(graph: &LayoutGraph, options: &LayoutOptions) -> LayoutResult {
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| try_layout(graph, options)));
    let mut result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => LayoutResult::failed(err.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            LayoutResult::failed(Error::Internal { message }.to_string())
        }
    };
    result.elapsed = start.elapsed();

    if let Some(err) = &result.error {
        tracing::warn!(error = %err, elapsed = ?result.elapsed, "layout failed");
    } else {
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            elapsed = ?result.elapsed,
            "layout finished"
        );
    }
    result
}

/// Cancellable wrapper around [`apply_layout`].
///
/// Cancellation is observed once, when the future is first polled. A layout that has started
/// runs to completion.
pub async fn apply_layout_async(
    graph: &LayoutGraph,
    options: &LayoutOptions,
    registration: AbortRegistration,
) -> std::result::Result<LayoutResult, Aborted> {
    Abortable::new(async { apply_layout(graph, options) }, registration).await
}

fn try_layout(graph: &LayoutGraph, options: &LayoutOptions) -> Result<LayoutResult> {
    options.validate()?;
    let g = IndexedGraph::build(graph)?;
    let real_count = g.sizes.len();

    let reversed = acyclic::feedback_edges(real_count, &g.edges);
    let oriented = acyclic::orient(&g.edges, &reversed);
    let ranks = rank::longest_path(real_count, &oriented);
    let normalized = normalize::split_long_edges(&ranks, &oriented);
    let node_count = normalized.ranks.len();

    let mut layers = order::init_layers(&normalized.ranks);
    let passes = order::reduce_crossings(&mut layers, &normalized.segments, node_count);

    let mut sizes = g.sizes.clone();
    sizes.resize(node_count, sextant_geom::Size::zero());
    let corners = position::assign_coordinates(&layers, &sizes, options);
    let center = |v: usize| point(corners[v].x + sizes[v].width / 2.0, corners[v].y + sizes[v].height / 2.0);

    let mut positions = IndexMap::with_capacity(real_count);
    let mut ranks_by_id = IndexMap::with_capacity(real_count);
    let mut bounds: Option<Rect> = None;
    for (i, n) in graph.nodes.iter().enumerate() {
        positions.insert(n.id.clone(), corners[i]);
        ranks_by_id.insert(n.id.clone(), ranks[i]);
        let r = rect(corners[i].x, corners[i].y, sizes[i].width, sizes[i].height);
        bounds = Some(bounds.map_or(r, |b| b.union_with(&r)));
    }
    let bounds = bounds
        .map(|b| b.inflate(options.margin, options.margin))
        .unwrap_or_else(Rect::zero);

    let mut edge_paths = IndexMap::with_capacity(graph.edges.len());
    for ((e, chain), &flipped) in graph.edges.iter().zip(&normalized.chains).zip(&reversed) {
        let mut path: Vec<Point> = chain.iter().map(|&v| center(v)).collect();
        if flipped {
            path.reverse();
        }
        edge_paths.insert(e.id.clone(), path);
    }

    tracing::debug!(
        ranks = layers.len(),
        virtual_nodes = node_count - real_count,
        reversed_edges = reversed.iter().filter(|&&r| r).count(),
        crossing_passes = passes,
        "layered graph assembled"
    );

    Ok(LayoutResult {
        success: true,
        positions,
        edge_paths,
        ranks: ranks_by_id,
        bounds,
        error: None,
        elapsed: std::time::Duration::ZERO,
    })
}
