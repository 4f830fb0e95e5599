use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouterOptions {
    /// Base grid unit. Obstacle corners are pushed out by one unit, the sparse waypoint grid uses
    /// two, and cache keys are quantized to it.
    pub grid_size: f64,
    /// How far the waypoint search box extends past the start/end bounding box.
    pub search_margin: f64,
    /// Douglas-Peucker perpendicular-distance tolerance.
    pub simplify_tolerance: f64,
    pub cache_capacity: usize,
    /// Test diagonal waypoint links against obstacles during the search.
    ///
    /// When `false`, only horizontal and vertical links are tested and every diagonal link is
    /// taken as clear. Post-processing still keeps the returned segments out of obstacles where
    /// it can, but searches may settle on paths that smoothing cannot straighten out.
    pub check_diagonals: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            search_margin: 60.0,
            simplify_tolerance: 1.0,
            cache_capacity: 512,
            check_diagonals: true,
        }
    }
}

impl RouterOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(Error::InvalidOption {
                name: "gridSize",
                value: self.grid_size,
            });
        }
        for (name, value) in [
            ("searchMargin", self.search_margin),
            ("simplifyTolerance", self.simplify_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption { name, value });
            }
        }
        if self.cache_capacity == 0 {
            return Err(Error::InvalidOption {
                name: "cacheCapacity",
                value: 0.0,
            });
        }
        Ok(())
    }
}
