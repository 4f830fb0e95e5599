#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id} references {node_id}")]
    MissingEndpoint { edge_id: String, node_id: String },

    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },

    #[error("node {node_id} has a negative or non-finite size")]
    InvalidNodeSize { node_id: String },

    #[error("invalid layout option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("layout failed internally: {message}")]
    Internal { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
