use sextant_geom::Rect;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid quadtree config `{name}`: {value}")]
    InvalidConfig { name: &'static str, value: f64 },

    #[error("quadtree bounds must be finite with non-negative size, got {bounds:?}")]
    InvalidBounds { bounds: Rect },
}

pub type Result<T> = std::result::Result<T, Error>;
