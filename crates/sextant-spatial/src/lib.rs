#![forbid(unsafe_code)]

//! A dynamic quadtree over shared, movable items.
//!
//! Items are held as `Arc<T>` and compared by pointer identity; equal values in different `Arc`s
//! are distinct items. The whole tree sits behind one `RwLock`: every public method takes the lock
//! once, which makes each call a consistent snapshot but gives no atomicity across calls.
//!
//! An item whose bounds change must be re-indexed with [`QuadTree::update`], passing the bounds
//! it was indexed under.

pub mod config;
pub mod error;
mod node;

pub use config::QuadTreeConfig;
pub use error::{Error, Result};
pub use sextant_geom::{Point, Rect};

use node::Node;
use serde::Serialize;
use sextant_geom::{RectExt, rect_around};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Anything with an axis-aligned bounding rectangle.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadTreeStats {
    pub items: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

/// Upper bound on radius doublings in [`QuadTree::nearest`].
const MAX_NEAREST_STEPS: usize = 64;

#[derive(Debug)]
struct Inner<T> {
    root: Node<T>,
    /// Inserts plus removes since the last rebuild.
    ops: usize,
}

#[derive(Debug)]
pub struct QuadTree<T> {
    config: QuadTreeConfig,
    inner: RwLock<Inner<T>>,
}

impl<T: Bounded> QuadTree<T> {
    /// Creates an empty tree covering `bounds`. `config` is used as given; see
    /// [`QuadTree::try_new`] for a validating constructor.
    pub fn new(bounds: Rect, config: QuadTreeConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Inner {
                root: Node::new(bounds, 0),
                ops: 0,
            }),
        }
    }

    pub fn try_new(bounds: Rect, config: QuadTreeConfig) -> Result<Self> {
        config.validate()?;
        let finite = [bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.max.x < bounds.min.x || bounds.max.y < bounds.min.y {
            return Err(Error::InvalidBounds { bounds });
        }
        Ok(Self::new(bounds, config))
    }

    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Indexes `item` under its current bounds.
    ///
    /// Returns `false` (and stores nothing) when the item does not touch the tree's bounds.
    pub fn insert(&self, item: Arc<T>) -> bool {
        let mut inner = self.write();
        let inserted = self.insert_locked(&mut inner, item);
        if inserted {
            self.record_op(&mut inner);
        }
        inserted
    }

    fn insert_locked(&self, inner: &mut Inner<T>, item: Arc<T>) -> bool {
        let b = item.bounds();
        if !inner.root.bounds.overlaps(&b) {
            return false;
        }
        inner.root.insert(item, b, &self.config);
        true
    }

    /// Removes `item` by identity.
    ///
    /// The item is looked up under its current bounds first, then in the whole tree.
    pub fn remove(&self, item: &Arc<T>) -> bool {
        let mut inner = self.write();
        let removed = inner.root.remove(item, &item.bounds(), &self.config)
            || inner.root.remove_anywhere(item, &self.config);
        if removed {
            self.record_op(&mut inner);
        }
        removed
    }

    /// Re-indexes an item that moved from `previous` to its current bounds.
    ///
    /// Runs under a single write lock, so readers see the item either before or after the move.
    /// When the item is not found under `previous` the whole tree is searched. Returns `false`
    /// if the item was not in the tree; nothing is inserted in that case. An item that moved
    /// entirely outside the tree is removed and not reinserted.
    pub fn update(&self, item: &Arc<T>, previous: Rect) -> bool {
        let mut inner = self.write();
        let removed = inner.root.remove(item, &previous, &self.config)
            || inner.root.remove_anywhere(item, &self.config);
        if !removed {
            return false;
        }
        self.record_op(&mut inner);
        if self.insert_locked(&mut inner, Arc::clone(item)) {
            self.record_op(&mut inner);
        }
        true
    }

    /// Inserts `item`, growing the tree to cover it first if needed.
    ///
    /// Growth that more than doubles the width or height rebuilds the tree over the new bounds;
    /// smaller growth only widens the root.
    pub fn insert_expanding(&self, item: Arc<T>) -> bool {
        let b = item.bounds();
        let finite = [b.min.x, b.min.y, b.max.x, b.max.y].iter().all(|v| v.is_finite());
        if !finite {
            return false;
        }

        let mut inner = self.write();
        let current = inner.root.bounds;
        if !current.encloses(&b) {
            let grown = current.union_with(&b);
            if grown.width() > current.width() * 2.0 || grown.height() > current.height() * 2.0 {
                tracing::debug!(from = ?current, to = ?grown, "quadtree grows past 2x; rebuilding");
                self.rebuild_locked(&mut inner, grown);
            } else {
                tracing::debug!(from = ?current, to = ?grown, "quadtree root bounds widened");
                inner.root.bounds = grown;
            }
        }
        let inserted = self.insert_locked(&mut inner, item);
        if inserted {
            self.record_op(&mut inner);
        }
        inserted
    }

    /// Items whose bounds overlap `area` (touching counts).
    pub fn query(&self, area: Rect) -> Vec<Arc<T>> {
        self.query_filtered(area, |_| true)
    }

    /// Items whose bounds overlap the square of half-size `radius` around `p`.
    pub fn query_point(&self, p: Point, radius: f64) -> Vec<Arc<T>> {
        self.query(square(p, radius))
    }

    /// Like [`QuadTree::query`], keeping only items for which `keep` returns `true`.
    pub fn query_filtered<F>(&self, area: Rect, keep: F) -> Vec<Arc<T>>
    where
        F: Fn(&T) -> bool,
    {
        let inner = self.read();
        let mut out = Vec::new();
        inner.root.query(&area, &keep, &mut out);
        out
    }

    /// Runs several range queries under one lock.
    pub fn query_batch(&self, areas: &[Rect]) -> Vec<Vec<Arc<T>>> {
        let inner = self.read();
        areas
            .iter()
            .map(|area| {
                let mut out = Vec::new();
                inner.root.query(area, &|_: &T| true, &mut out);
                out
            })
            .collect()
    }

    /// Runs several point queries under one lock.
    pub fn query_points_batch(&self, points: &[(Point, f64)]) -> Vec<Vec<Arc<T>>> {
        let areas: Vec<Rect> = points.iter().map(|&(p, r)| square(p, r)).collect();
        self.query_batch(&areas)
    }

    /// The item whose center is closest to `p`.
    ///
    /// The search radius starts at `min_node_size` (at least 1) and doubles until some item
    /// falls inside the query square; the closest of those is returned. That is the closest
    /// item of the first non-empty square, which can differ from the global nearest when item
    /// sizes vary widely.
    pub fn nearest(&self, p: Point) -> Option<Arc<T>> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }
        let inner = self.read();
        if inner.root.count == 0 {
            return None;
        }
        let b = inner.root.bounds;
        let reach = [p.x - b.min.x, b.max.x - p.x, p.y - b.min.y, b.max.y - p.y]
            .into_iter()
            .map(f64::abs)
            .fold(0.0, f64::max);

        let mut radius = self.config.min_node_size.max(1.0);
        for _ in 0..MAX_NEAREST_STEPS {
            let mut candidates = Vec::new();
            inner.root.query(&square(p, radius), &|_: &T| true, &mut candidates);
            if !candidates.is_empty() {
                return candidates.into_iter().min_by(|x, y| {
                    let dx = (x.bounds().center() - p).square_length();
                    let dy = (y.bounds().center() - p).square_length();
                    dx.total_cmp(&dy)
                });
            }
            if radius >= reach {
                break;
            }
            radius *= 2.0;
        }
        None
    }

    /// Every indexed item, depth first.
    pub fn items(&self) -> Vec<Arc<T>> {
        let inner = self.read();
        let mut out = Vec::with_capacity(inner.root.count);
        inner.root.collect(&mut out);
        out
    }

    /// Flattens the tree and reinserts every item under its current bounds.
    ///
    /// Items that no longer touch the tree's bounds are dropped.
    pub fn rebuild(&self) {
        let mut inner = self.write();
        let bounds = inner.root.bounds;
        self.rebuild_locked(&mut inner, bounds);
    }

    fn rebuild_locked(&self, inner: &mut Inner<T>, bounds: Rect) {
        let mut items = Vec::with_capacity(inner.root.count);
        inner.root.collect(&mut items);
        inner.root = Node::new(bounds, 0);
        inner.ops = 0;
        let total = items.len();
        for item in items {
            self.insert_locked(inner, item);
        }
        tracing::debug!(
            items = total,
            kept = inner.root.count,
            "quadtree rebuilt"
        );
    }

    fn record_op(&self, inner: &mut Inner<T>) {
        inner.ops += 1;
        if inner.ops >= self.config.rebuild_threshold {
            let bounds = inner.root.bounds;
            self.rebuild_locked(inner, bounds);
        }
    }

    pub fn clear(&self) {
        let mut inner = self.write();
        let bounds = inner.root.bounds;
        inner.root = Node::new(bounds, 0);
        inner.ops = 0;
    }

    pub fn len(&self) -> usize {
        self.read().root.count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounds(&self) -> Rect {
        self.read().root.bounds
    }

    pub fn stats(&self) -> QuadTreeStats {
        let inner = self.read();
        let (nodes, leaves, max_depth) = inner.root.shape();
        QuadTreeStats {
            items: inner.root.count,
            nodes,
            leaves,
            max_depth,
        }
    }
}

fn square(p: Point, radius: f64) -> Rect {
    let r = radius.abs();
    rect_around(p, r * 2.0, r * 2.0)
}
