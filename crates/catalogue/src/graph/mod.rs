//! Weighted directed graph and shortest-path engine.

pub mod dijkstra;
pub mod weighted;

pub use dijkstra::{Dijkstra, PathFinder, PathInfo};
pub use weighted::{DirectedWeightedGraph, Edge, EdgeId, VertexId};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GraphError {
    #[error("Vertex not in graph: {0:?}")]
    UnknownVertex(VertexId),

    #[error("Edge weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),
}
