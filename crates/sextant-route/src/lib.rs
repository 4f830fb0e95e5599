#![forbid(unsafe_code)]

//! Obstacle-avoiding connector routing.
//!
//! [`PathRouter::find_path`] builds a waypoint set around the obstacles ([`waypoints`]), runs A*
//! over it ([`astar`]) and post-processes the result into a short, mostly orthogonal polyline
//! ([`simplify`]). Results are memoized in a bounded LRU cache keyed on grid-quantized inputs.
//!
//! Routing never fails: when no route exists the direct two-point segment is returned.

mod astar;
mod cache;
pub mod error;
pub mod options;
pub mod path;
pub mod simplify;
pub mod waypoints;

pub use astar::reachable;
pub use error::{Error, Result};
pub use options::RouterOptions;
pub use path::{Path, PathRequest, force_orthogonal, path_length};
pub use sextant_geom::{Point, Rect};
pub use simplify::simplify_path;

use cache::{CacheKey, LruCache};
use futures::future::{AbortRegistration, Abortable, Aborted};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Call counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub requests: u64,
    pub cache_hits: u64,
    /// Requests that ran a waypoint search (cache misses with finite endpoints and a usable grid).
    pub searches: u64,
}

#[derive(Debug)]
pub struct PathRouter {
    options: RouterOptions,
    cache: Mutex<LruCache<CacheKey, Path>>,
    requests: AtomicU64,
    cache_hits: AtomicU64,
    searches: AtomicU64,
}

impl Default for PathRouter {
    fn default() -> Self {
        Self::new(RouterOptions::default())
    }
}

impl PathRouter {
    /// Creates a router without validating `options`. Prefer [`PathRouter::try_new`] for options
    /// loaded from outside the program.
    ///
    /// A router whose `grid_size` is not a positive finite number never searches; every request
    /// gets the direct segment.
    pub fn new(options: RouterOptions) -> Self {
        let cache = Mutex::new(LruCache::new(options.cache_capacity));
        Self {
            options,
            cache,
            requests: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            searches: AtomicU64::new(0),
        }
    }

    pub fn try_new(options: RouterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Routes from `start` to `end` around `obstacles`.
    ///
    /// The first point is `start` and the last is `end`. A cached route computed for inputs that
    /// quantize to the same grid cells is reused with its endpoints moved onto the exact request,
    /// unless moving them makes a clear first or last segment run into an obstacle; the request
    /// is then routed afresh and replaces the cache entry.
    pub fn find_path(&self, start: Point, end: Point, obstacles: &[Rect]) -> Path {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let key = CacheKey::new(start, end, obstacles, self.options.grid_size);

        let cached = self.lock_cache().get(&key);
        if let Some(mut path) = cached {
            let clear_before = !path.end_segments_blocked(obstacles);
            path.pin_endpoints(start, end);
            if !(clear_before && path.end_segments_blocked(obstacles)) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(points = path.len(), "route cache hit");
                return path;
            }
            tracing::debug!("cached route clips an obstacle at the request endpoints; rerouting");
        }

        let path = self.route_uncached(start, end, obstacles);
        tracing::debug!(
            obstacles = obstacles.len(),
            points = path.len(),
            "route cache miss"
        );
        self.lock_cache().insert(key, path.clone());
        path
    }

    /// Cancellable wrapper around [`PathRouter::find_path`].
    ///
    /// Cancellation is observed once, when the future is first polled.
    pub async fn find_path_async(
        &self,
        start: Point,
        end: Point,
        obstacles: &[Rect],
        registration: AbortRegistration,
    ) -> std::result::Result<Path, Aborted> {
        Abortable::new(async { self.find_path(start, end, obstacles) }, registration).await
    }

    /// Routes every request in parallel. The output is in request order.
    pub fn find_paths(&self, requests: &[PathRequest]) -> Vec<Path> {
        requests
            .par_iter()
            .map(|r| self.find_path(r.start, r.end, &r.obstacles))
            .collect()
    }

    /// Routes without reading or writing the cache.
    pub fn route_uncached(&self, start: Point, end: Point, obstacles: &[Rect]) -> Path {
        let finite = [start.x, start.y, end.x, end.y].iter().all(|v| v.is_finite());
        let grid = self.options.grid_size;
        if !finite || !(grid.is_finite() && grid > 0.0) {
            return Path::direct(start, end);
        }
        self.searches.fetch_add(1, Ordering::Relaxed);

        let opts = &self.options;
        let points = waypoints::generate(start, end, obstacles, opts);
        let Some(raw) = astar::search(&points, obstacles, opts.grid_size, opts.check_diagonals)
        else {
            tracing::debug!(waypoints = points.len(), "no route; using direct segment");
            return Path::direct(start, end);
        };

        let mut path = Path::new(simplify::post_process(&raw, obstacles, opts.simplify_tolerance));
        path.pin_endpoints(start, end);
        path
    }

    pub fn invalidate_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn stats(&self) -> RouterStats {
        RouterStats {
            requests: self.requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, Path>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
