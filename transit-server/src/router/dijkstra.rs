//! Minimum-cost path search.
//!
//! The itinerary resolver only depends on the [`PathSolver`] contract:
//! given a graph with non-negative weights, return the edges of a cheapest
//! path between two vertices or report that none exists. [`Dijkstra`] is
//! the implementation used in production.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use super::graph::{EdgeId, TransitGraph, Vertex};

/// A cheapest path found by a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    /// Edges in traversal order
    pub edges: Vec<EdgeId>,
    /// Sum of the edge weights
    pub weight: f64,
}

/// Capability to find minimum-cost paths in a [`TransitGraph`].
///
/// Implementations must accept parallel edges between the same pair of
/// vertices and must return `None` rather than fail when the target is
/// unreachable. A path from a vertex to itself is empty.
pub trait PathSolver {
    /// Find a cheapest path from `source` to `target`.
    fn find_shortest_path(
        &self,
        graph: &TransitGraph,
        source: Vertex,
        target: Vertex,
    ) -> Option<RouteInfo>;
}

/// Dijkstra's algorithm over a binary heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

/// Heap entry. Ordered so the heap pops the cheapest vertex first.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    vertex: usize,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipped on cost for a min-heap; ties broken on vertex to stay
        // consistent with `Eq`
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathSolver for Dijkstra {
    fn find_shortest_path(
        &self,
        graph: &TransitGraph,
        source: Vertex,
        target: Vertex,
    ) -> Option<RouteInfo> {
        if !graph.contains(source) || !graph.contains(target) {
            return None;
        }

        let vertex_count = graph.vertex_count();
        let mut dist = vec![f64::INFINITY; vertex_count];
        let mut via: Vec<Option<EdgeId>> = vec![None; vertex_count];
        let mut heap = BinaryHeap::new();
        let mut settled = 0usize;

        dist[source.index()] = 0.0;
        heap.push(State {
            cost: 0.0,
            vertex: source.index(),
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if cost > dist[vertex] {
                continue;
            }
            settled += 1;
            if vertex == target.index() {
                trace!(settled, cost, "path found");
                return Some(RouteInfo {
                    edges: unwind(graph, &via, source, target),
                    weight: cost,
                });
            }

            for &edge_id in graph.outgoing(Vertex::from_index(vertex)) {
                let edge = graph.edge(edge_id);
                let next = edge.to.index();
                let candidate = cost + edge.weight;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    via[next] = Some(edge_id);
                    heap.push(State {
                        cost: candidate,
                        vertex: next,
                    });
                }
            }
        }

        trace!(settled, "target unreachable");
        None
    }
}

/// Follow predecessor edges back from `target` and return them in order.
fn unwind(graph: &TransitGraph, via: &[Option<EdgeId>], source: Vertex, target: Vertex) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut vertex = target.index();
    while vertex != source.index() {
        let Some(edge_id) = via[vertex] else {
            break;
        };
        edges.push(edge_id);
        vertex = graph.edge(edge_id).from.index();
    }
    edges.reverse();
    edges
}
