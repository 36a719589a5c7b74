//! Travel-time graph.
//!
//! Every stop owns two vertices. Riders reach the *arrival* vertex when
//! they step off a bus and the *boarding* vertex once they have waited
//! for the next one. The only edge between the two is the wait edge, so
//! every change of bus pays the wait time exactly once.

use crate::domain::{CatalogError, LineId, StopId};

use super::config::ConfigError;

/// Errors raised while constructing a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Catalogue data is inconsistent (e.g. a missing road distance)
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Routing settings are unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An edge's kind does not fit its endpoints
    #[error("edge {edge} joins {from:?} to {to:?}, which a {kind} edge cannot")]
    MalformedEdge {
        edge: usize,
        from: Vertex,
        to: Vertex,
        kind: &'static str,
    },

    /// An edge refers to a vertex beyond the graph
    #[error("edge {edge} refers to vertex {vertex} outside a graph of {vertex_count} vertices")]
    VertexOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },
}

/// A graph vertex: one of the two vertices owned by a stop.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopId;
/// use transit_server::router::Vertex;
///
/// let arrival = Vertex::Arrival(StopId(2));
/// let boarding = Vertex::Boarding(StopId(2));
/// assert_eq!(arrival.index(), 4);
/// assert_eq!(boarding.index(), 5);
/// assert_eq!(Vertex::from_index(5), boarding);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    /// Reached on stepping off a bus at the stop
    Arrival(StopId),
    /// Reached after waiting at the stop, ready to board
    Boarding(StopId),
}

impl Vertex {
    /// Dense index of this vertex: `2 * stop` for arrival, one more for boarding.
    pub fn index(self) -> usize {
        match self {
            Vertex::Arrival(stop) => stop.0 * 2,
            Vertex::Boarding(stop) => stop.0 * 2 + 1,
        }
    }

    /// Inverse of [`Vertex::index`].
    pub fn from_index(index: usize) -> Self {
        let stop = StopId(index / 2);
        if index % 2 == 0 {
            Vertex::Arrival(stop)
        } else {
            Vertex::Boarding(stop)
        }
    }

    /// The stop owning this vertex.
    pub fn stop(self) -> StopId {
        match self {
            Vertex::Arrival(stop) | Vertex::Boarding(stop) => stop,
        }
    }
}

/// Handle of an edge within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// What an edge models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Waiting at a stop before boarding
    Wait,
    /// Riding one line without changing vehicles
    Ride {
        /// The line ridden
        line: LineId,
        /// Number of stop-to-stop hops covered
        span_count: usize,
    },
}

/// A directed, weighted edge. Weights are minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: f64,
    pub kind: EdgeKind,
}

impl Edge {
    /// Returns true if the endpoints fit the kind: a wait edge runs from a
    /// stop's arrival vertex to its own boarding vertex, a ride edge from
    /// a boarding vertex to an arrival vertex.
    pub fn is_well_formed(&self) -> bool {
        match (self.from, self.to, self.kind) {
            (Vertex::Arrival(a), Vertex::Boarding(b), EdgeKind::Wait) => a == b,
            (Vertex::Boarding(_), Vertex::Arrival(_), EdgeKind::Ride { .. }) => true,
            _ => false,
        }
    }

    /// The wait edge of a stop.
    pub fn wait(stop: StopId, minutes: f64) -> Self {
        Self {
            from: Vertex::Arrival(stop),
            to: Vertex::Boarding(stop),
            weight: minutes,
            kind: EdgeKind::Wait,
        }
    }

    /// A ride edge from boarding at `from` to arriving at `to`.
    pub fn ride(from: StopId, to: StopId, line: LineId, span_count: usize, minutes: f64) -> Self {
        Self {
            from: Vertex::Boarding(from),
            to: Vertex::Arrival(to),
            weight: minutes,
            kind: EdgeKind::Ride { line, span_count },
        }
    }
}

/// Immutable directed weighted graph over `2 × stops` vertices.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    edges: Vec<Edge>,
    /// Outgoing edges per vertex index.
    outgoing: Vec<Vec<EdgeId>>,
}

impl TransitGraph {
    /// Build a graph for `stop_count` stops from a complete edge list.
    ///
    /// Edge ids are positions in `edges`. Every edge must be well formed
    /// (see [`Edge::is_well_formed`]).
    pub fn from_edges(stop_count: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let vertex_count = stop_count * 2;
        let mut outgoing = vec![Vec::new(); vertex_count];

        for (i, edge) in edges.iter().enumerate() {
            for vertex in [edge.from.index(), edge.to.index()] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        edge: i,
                        vertex,
                        vertex_count,
                    });
                }
            }
            if !edge.is_well_formed() {
                return Err(GraphError::MalformedEdge {
                    edge: i,
                    from: edge.from,
                    to: edge.to,
                    kind: match edge.kind {
                        EdgeKind::Wait => "wait",
                        EdgeKind::Ride { .. } => "ride",
                    },
                });
            }
            outgoing[edge.from.index()].push(EdgeId(i));
        }

        Ok(Self { edges, outgoing })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get an edge by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All edges with their handles.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Edges leaving a vertex. Empty for vertices outside the graph.
    pub fn outgoing(&self, vertex: Vertex) -> &[EdgeId] {
        self.outgoing
            .get(vertex.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if the vertex belongs to this graph.
    pub fn contains(&self, vertex: Vertex) -> bool {
        vertex.index() < self.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_index_roundtrip() {
        for i in 0..10 {
            assert_eq!(Vertex::from_index(i).index(), i);
        }
        assert_eq!(Vertex::from_index(7).stop(), StopId(3));
    }

    #[test]
    fn from_edges_indexes_outgoing() {
        let edges = vec![
            Edge::wait(StopId(0), 5.0),
            Edge::wait(StopId(1), 5.0),
            Edge::ride(StopId(0), StopId(1), LineId(0), 1, 2.0),
        ];
        let graph = TransitGraph::from_edges(2, edges).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing(Vertex::Arrival(StopId(0))), &[EdgeId(0)]);
        assert_eq!(graph.outgoing(Vertex::Boarding(StopId(0))), &[EdgeId(2)]);
        assert!(graph.outgoing(Vertex::Boarding(StopId(1))).is_empty());
        assert!(graph.outgoing(Vertex::Arrival(StopId(9))).is_empty());
        assert_eq!(graph.edge(EdgeId(2)).kind, EdgeKind::Ride { line: LineId(0), span_count: 1 });
    }

    #[test]
    fn from_edges_rejects_foreign_vertices() {
        let edges = vec![Edge::ride(StopId(0), StopId(3), LineId(0), 1, 1.0)];
        assert_eq!(
            TransitGraph::from_edges(2, edges).unwrap_err(),
            GraphError::VertexOutOfRange {
                edge: 0,
                vertex: 6,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn from_edges_rejects_mislabelled_edges() {
        let boarding_wait = Edge {
            from: Vertex::Boarding(StopId(0)),
            to: Vertex::Boarding(StopId(1)),
            weight: 1.0,
            kind: EdgeKind::Wait,
        };
        assert_eq!(
            TransitGraph::from_edges(2, vec![Edge::wait(StopId(1), 1.0), boarding_wait]).unwrap_err(),
            GraphError::MalformedEdge {
                edge: 1,
                from: Vertex::Boarding(StopId(0)),
                to: Vertex::Boarding(StopId(1)),
                kind: "wait"
            }
        );

        let arrival_ride = Edge {
            from: Vertex::Arrival(StopId(0)),
            ..Edge::ride(StopId(0), StopId(1), LineId(0), 1, 1.0)
        };
        assert!(matches!(
            TransitGraph::from_edges(2, vec![arrival_ride]),
            Err(GraphError::MalformedEdge { kind: "ride", .. })
        ));

        let cross_wait = Edge {
            to: Vertex::Boarding(StopId(1)),
            ..Edge::wait(StopId(0), 1.0)
        };
        assert!(!cross_wait.is_well_formed());
        assert!(Edge::wait(StopId(0), 1.0).is_well_formed());
        assert!(Edge::ride(StopId(0), StopId(0), LineId(0), 1, 0.0).is_well_formed());
    }

    #[test]
    fn empty_graph() {
        let graph = TransitGraph::from_edges(0, Vec::new()).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert!(!graph.contains(Vertex::Arrival(StopId(0))));
    }
}
