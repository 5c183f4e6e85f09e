//! Directed graph with non-negative `f64` edge weights.

use crate::graph::GraphError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Adjacency-list graph. Vertex and edge ids are dense and assigned in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: Vec::with_capacity(vertices),
        }
    }

    pub fn add_vertex(&mut self) -> VertexId {
        self.incidence.push(Vec::new());
        VertexId(self.incidence.len() - 1)
    }

    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Result<EdgeId, GraphError> {
        for vertex in [from, to] {
            if vertex.0 >= self.incidence.len() {
                return Err(GraphError::UnknownVertex(vertex));
            }
        }
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(GraphError::InvalidWeight(weight));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { from, to, weight });
        self.incidence[from.0].push(id);
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Outgoing edges of `vertex`
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incidence[vertex.0]
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
