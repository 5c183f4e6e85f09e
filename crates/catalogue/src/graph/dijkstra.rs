//! Single-pair shortest paths.

use ordered_float::OrderedFloat;
use pathfinding::prelude::dijkstra;

use crate::graph::weighted::{DirectedWeightedGraph, EdgeId, VertexId};

/// A shortest path: total weight and the edges walked, in order
#[derive(Clone, Debug, PartialEq)]
pub struct PathInfo {
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

/// Shortest-path engine over a weighted graph.
///
/// Implementations may assume all edge weights are non-negative.
pub trait PathFinder: Send + Sync {
    fn find_path(&self, graph: &DirectedWeightedGraph, from: VertexId, to: VertexId) -> Option<PathInfo>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

impl PathFinder for Dijkstra {
    fn find_path(&self, graph: &DirectedWeightedGraph, from: VertexId, to: VertexId) -> Option<PathInfo> {
        let n = graph.vertex_count();
        if from.0 >= n || to.0 >= n {
            return None;
        }

        let (vertices, weight) = dijkstra(
            &from,
            |&vertex| {
                graph.incident_edges(vertex).iter().map(move |&id| {
                    let edge = graph.edge(id);
                    (edge.to, OrderedFloat(edge.weight))
                })
            },
            |&vertex| vertex == to,
        )?;

        let edges = vertices
            .windows(2)
            .map(|pair| cheapest_edge(graph, pair[0], pair[1]))
            .collect::<Option<Vec<_>>>()?;

        Some(PathInfo {
            weight: weight.into_inner(),
            edges,
        })
    }
}

// The search yields vertices only; between two consecutive ones it used the
// lightest of any parallel edges.
fn cheapest_edge(graph: &DirectedWeightedGraph, from: VertexId, to: VertexId) -> Option<EdgeId> {
    graph
        .incident_edges(from)
        .iter()
        .copied()
        .filter(|&id| graph.edge(id).to == to)
        .min_by(|&a, &b| graph.edge(a).weight.total_cmp(&graph.edge(b).weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diamond() -> (DirectedWeightedGraph, [VertexId; 4]) {
        //   a -1-> b -1-> d
        //   a -0.5-> c -2-> d
        let mut graph = DirectedWeightedGraph::new();
        let v = [graph.add_vertex(), graph.add_vertex(), graph.add_vertex(), graph.add_vertex()];
        graph.add_edge(v[0], v[1], 1.0).unwrap();
        graph.add_edge(v[1], v[3], 1.0).unwrap();
        graph.add_edge(v[0], v[2], 0.5).unwrap();
        graph.add_edge(v[2], v[3], 2.0).unwrap();
        (graph, v)
    }

    #[test]
    fn test_cheapest_path() {
        let (graph, v) = diamond();
        let path = Dijkstra.find_path(&graph, v[0], v[3]).unwrap();

        assert_relative_eq!(path.weight, 2.0);
        assert_eq!(path.edges, vec![EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn test_same_vertex() {
        let (graph, v) = diamond();
        let path = Dijkstra.find_path(&graph, v[2], v[2]).unwrap();

        assert_eq!(path.weight, 0.0);
        assert!(path.edges.is_empty());
    }

    #[test]
    fn test_unreachable() {
        let (graph, v) = diamond();
        assert!(Dijkstra.find_path(&graph, v[3], v[0]).is_none());
        assert!(Dijkstra.find_path(&graph, v[0], VertexId(42)).is_none());
    }

    #[test]
    fn test_parallel_edges_take_the_lightest() {
        let mut graph = DirectedWeightedGraph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        graph.add_edge(a, b, 5.0).unwrap();
        let light = graph.add_edge(a, b, 2.0).unwrap();
        graph.add_edge(a, b, 3.0).unwrap();

        let path = Dijkstra.find_path(&graph, a, b).unwrap();
        assert_relative_eq!(path.weight, 2.0);
        assert_eq!(path.edges, vec![light]);
    }

    #[test]
    fn test_zero_weight_cycle() {
        let mut graph = DirectedWeightedGraph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let c = graph.add_vertex();
        graph.add_edge(a, b, 0.0).unwrap();
        graph.add_edge(b, a, 0.0).unwrap();
        let bc = graph.add_edge(b, c, 3.0).unwrap();

        let path = Dijkstra.find_path(&graph, a, c).unwrap();
        assert_relative_eq!(path.weight, 3.0);
        assert_eq!(path.edges.last(), Some(&bc));
    }
}
