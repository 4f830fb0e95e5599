//! The owned quadrant tree behind [`QuadTree`](crate::QuadTree).
//!
//! Every method here runs under the tree's lock; none of them lock anything themselves.

use crate::Bounded;
use crate::config::QuadTreeConfig;
use sextant_geom::{Rect, RectExt, point};
use std::sync::Arc;

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) bounds: Rect,
    pub(crate) depth: usize,
    /// Items that straddle quadrants, or every item of a leaf.
    pub(crate) items: Vec<Arc<T>>,
    pub(crate) children: Option<Box<[Node<T>; 4]>>,
    /// Items held by this node and all of its descendants.
    pub(crate) count: usize,
}

impl<T: Bounded> Node<T> {
    pub(crate) fn new(bounds: Rect, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
            count: 0,
        }
    }

    /// The child a rectangle belongs to: the first quadrant that encloses it.
    fn child_for(&mut self, b: &Rect) -> Option<&mut Node<T>> {
        self.children
            .as_mut()
            .and_then(|children| children.iter_mut().find(|c| c.bounds.encloses(b)))
    }

    pub(crate) fn insert(&mut self, item: Arc<T>, b: Rect, config: &QuadTreeConfig) {
        self.count += 1;
        if let Some(child) = self.child_for(&b) {
            child.insert(item, b, config);
            return;
        }
        self.items.push(item);
        if self.children.is_none() && self.can_subdivide(config) {
            self.subdivide(config);
        }
    }

    fn can_subdivide(&self, config: &QuadTreeConfig) -> bool {
        self.items.len() > config.max_items_per_node
            && self.depth < config.max_depth
            && self.bounds.width() / 2.0 > config.min_node_size
            && self.bounds.height() / 2.0 > config.min_node_size
    }

    fn subdivide(&mut self, config: &QuadTreeConfig) {
        let Rect { min, max } = self.bounds;
        let c = self.bounds.center();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            Node::new(Rect::new(min, c), depth),
            Node::new(Rect::new(point(c.x, min.y), point(max.x, c.y)), depth),
            Node::new(Rect::new(point(min.x, c.y), point(c.x, max.y)), depth),
            Node::new(Rect::new(c, max), depth),
        ]));
        tracing::trace!(depth = self.depth, items = self.items.len(), "quadtree subdivide");

        let items = std::mem::take(&mut self.items);
        for item in items {
            let b = item.bounds();
            match self.child_for(&b) {
                Some(child) => child.insert(item, b, config),
                None => self.items.push(item),
            }
        }
    }

    /// Removes `item`, descending along the quadrants that enclose `b`.
    pub(crate) fn remove(&mut self, item: &Arc<T>, b: &Rect, config: &QuadTreeConfig) -> bool {
        let removed = if let Some(pos) = self.items.iter().position(|i| Arc::ptr_eq(i, item)) {
            self.items.remove(pos);
            true
        } else {
            match self.child_for(b) {
                Some(child) => child.remove(item, b, config),
                None => false,
            }
        };
        if removed {
            self.count -= 1;
            self.try_merge(config);
        }
        removed
    }

    /// Removes `item` wherever it is, searching the whole subtree.
    pub(crate) fn remove_anywhere(&mut self, item: &Arc<T>, config: &QuadTreeConfig) -> bool {
        let removed = if let Some(pos) = self.items.iter().position(|i| Arc::ptr_eq(i, item)) {
            self.items.remove(pos);
            true
        } else {
            self.children.as_mut().is_some_and(|children| {
                children.iter_mut().any(|c| c.remove_anywhere(item, config))
            })
        };
        if removed {
            self.count -= 1;
            self.try_merge(config);
        }
        removed
    }

    fn try_merge(&mut self, config: &QuadTreeConfig) {
        if self.children.is_none() || self.count - self.items.len() > config.merge_threshold {
            return;
        }
        if let Some(children) = self.children.take() {
            for child in *children {
                child.drain_into(&mut self.items);
            }
            tracing::trace!(depth = self.depth, items = self.items.len(), "quadtree merge");
        }
    }

    fn drain_into(self, out: &mut Vec<Arc<T>>) {
        out.extend(self.items);
        if let Some(children) = self.children {
            for child in *children {
                child.drain_into(out);
            }
        }
    }

    /// Collects items whose bounds overlap `area` and that satisfy `keep`.
    ///
    /// This node's own items are always tested; children are skipped when their quadrant misses
    /// `area`.
    pub(crate) fn query<F>(&self, area: &Rect, keep: &F, out: &mut Vec<Arc<T>>)
    where
        F: Fn(&T) -> bool,
    {
        out.extend(
            self.items
                .iter()
                .filter(|i| i.bounds().overlaps(area) && keep(i))
                .cloned(),
        );
        if let Some(children) = &self.children {
            for child in children.iter().filter(|c| c.bounds.overlaps(area)) {
                child.query(area, keep, out);
            }
        }
    }

    pub(crate) fn collect(&self, out: &mut Vec<Arc<T>>) {
        out.extend(self.items.iter().cloned());
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect(out);
            }
        }
    }

    /// (nodes, leaves, deepest depth) of this subtree.
    pub(crate) fn shape(&self) -> (usize, usize, usize) {
        match &self.children {
            None => (1, 1, self.depth),
            Some(children) => children.iter().fold((1, 0, self.depth), |acc, c| {
                let (n, l, d) = c.shape();
                (acc.0 + n, acc.1 + l, acc.2.max(d))
            }),
        }
    }
}
