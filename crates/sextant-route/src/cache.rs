//! Bounded LRU cache of routed paths.

use rustc_hash::{FxHashMap, FxHasher};
use sextant_geom::{Point, Rect};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Least-recently-used map. `get` refreshes an entry; inserting past capacity evicts the entry
/// touched longest ago.
///
/// Each entry carries the stamp of its last use and `order` maps stamps back to keys, so
/// refreshing and evicting are logarithmic in the entry count.
#[derive(Debug)]
pub(crate) struct LruCache<K, V> {
    entries: FxHashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
    next_stamp: u64,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            order: BTreeMap::new(),
            next_stamp: 0,
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn get(&mut self, key: &K) -> Option<V> {
        let stamp = self.next_stamp;
        let (value, used) = self.entries.get_mut(key)?;
        let previous = std::mem::replace(used, stamp);
        let value = value.clone();
        self.next_stamp += 1;
        if let Some(k) = self.order.remove(&previous) {
            self.order.insert(stamp, k);
        }
        Some(value)
    }

    pub(crate) fn insert(&mut self, key: K, value: V) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        if let Some((_, previous)) = self.entries.insert(key.clone(), (value, stamp)) {
            self.order.remove(&previous);
        }
        self.order.insert(stamp, key);
        while self.entries.len() > self.capacity {
            let Some((_, old)) = self.order.pop_first() else {
                break;
            };
            self.entries.remove(&old);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Requests whose endpoints and obstacles land on the same grid cells share a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    start: (i64, i64),
    end: (i64, i64),
    obstacles: u64,
}

impl CacheKey {
    pub(crate) fn new(start: Point, end: Point, obstacles: &[Rect], grid: f64) -> Self {
        let q = |v: f64| (v / grid).round() as i64;
        let mut quantized: Vec<[i64; 4]> = obstacles
            .iter()
            .map(|o| [q(o.min.x), q(o.min.y), q(o.max.x), q(o.max.y)])
            .collect();
        // Order-independent: the same set of obstacles hashes the same whichever way it arrives.
        quantized.sort_unstable();
        let mut hasher = FxHasher::default();
        quantized.hash(&mut hasher);
        Self {
            start: (q(start.x), q(start.y)),
            end: (q(end.x), q(end.y)),
            obstacles: hasher.finish(),
        }
    }
}
