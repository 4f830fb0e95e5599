#![forbid(unsafe_code)]

//! `sextant` is the geometry engine behind a flow-chart editor.
//!
//! The three engines are independent and stateless towards the caller's object model: the
//! editor hands over plain descriptors and applies the returned positions, paths and query
//! results itself.
//!
//! # Features
//!
//! - `layout`: layered node layout (`sextant::layout`)
//! - `route`: obstacle-avoiding connector routing (`sextant::route`)
//! - `spatial`: quadtree hit-testing and culling (`sextant::spatial`)
//!
//! All three are enabled by default.

pub use sextant_geom as geom;
pub use sextant_geom::{Point, Rect, RectExt, Size, point, rect};

#[cfg(feature = "layout")]
pub use sextant_layout as layout;
#[cfg(feature = "layout")]
pub use sextant_layout::{LayoutGraph, LayoutOptions, LayoutResult, apply_layout, apply_layout_async};

#[cfg(feature = "route")]
pub use sextant_route as route;
#[cfg(feature = "route")]
pub use sextant_route::{Path, PathRequest, PathRouter, RouterOptions};

#[cfg(feature = "spatial")]
pub use sextant_spatial as spatial;
#[cfg(feature = "spatial")]
pub use sextant_spatial::{Bounded, QuadTree, QuadTreeConfig};
