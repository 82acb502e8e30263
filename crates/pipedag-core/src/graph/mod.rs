/// Canonical graph construction using `petgraph`, plus cycle detection.
///
/// A [`CanonicalGraph`] is built from a [`NormalizedGraph`] and is the only
/// structure the acyclicity checker reads. It wraps a petgraph [`DiGraph`]
/// whose node indices are dense, so the in-degree table is a plain
/// `Vec<usize>` indexed by [`NodeIndex::index`].
///
/// Adjacency is index based: a node's successor list is the set of its
/// outgoing petgraph edges, one entry per admissible edge record. Parallel
/// edges and self-loops are kept as-is.
///
/// # Cycle Detection
///
/// See the [`cycles`] submodule for Kahn's algorithm.
pub mod cycles;

pub use cycles::{KahnOutcome, is_dag, kahn};

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::newtypes::NodeId;
use crate::normalize::NormalizedGraph;

/// Weight stored inline on each petgraph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeWeight {
    /// Canonical identifier of the node.
    pub id: NodeId,
    /// Index of the defining record in the submitted node list.
    pub record_index: usize,
}

/// Weight stored inline on each petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeWeight {
    /// Index of the originating record in the submitted edge list.
    pub record_index: usize,
}

// ---------------------------------------------------------------------------
// CanonicalGraph
// ---------------------------------------------------------------------------

/// Request-scoped directed graph over the canonical node set.
///
/// Holds the node set, the successor lists and the initial in-degree of
/// every node. Construct with [`build_graph`]; the structure is immutable
/// afterwards, so checking it any number of times gives the same answer.
#[derive(Debug, Clone)]
pub struct CanonicalGraph {
    graph: DiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<NodeId, NodeIndex>,
    in_degree: Vec<usize>,
}

impl CanonicalGraph {
    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of admissible edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the [`NodeIndex`] for a node identifier.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the [`NodeWeight`] for the given index.
    pub fn node_weight(&self, idx: NodeIndex) -> Option<&NodeWeight> {
        self.graph.node_weight(idx)
    }

    /// Initial in-degree of the node at `idx` (0 for an unknown index).
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.in_degree.get(idx.index()).copied().unwrap_or(0)
    }

    /// Initial in-degree table, indexed by [`NodeIndex::index`].
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Successors of `idx`, one entry per outgoing edge.
    ///
    /// A target reached by several parallel edges appears once per edge.
    /// Order is unspecified.
    pub fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Returns a reference to the underlying [`DiGraph`].
    pub fn graph(&self) -> &DiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Constructs a [`CanonicalGraph`] from a [`NormalizedGraph`].
///
/// Construction is O(N + E) and cannot fail: the normalizer has already
/// removed every record that would not resolve.
///
/// 1. Every canonical id becomes a node with in-degree zero.
/// 2. Every admissible edge is added source → target and increments the
///    target's in-degree by one.
pub fn build_graph(normalized: &NormalizedGraph) -> CanonicalGraph {
    let node_count = normalized.node_count();
    let edge_count = normalized.edges().len();

    let mut graph: DiGraph<NodeWeight, EdgeWeight> = DiGraph::with_capacity(node_count, edge_count);
    let mut id_to_index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(node_count);
    let mut positions: Vec<NodeIndex> = Vec::with_capacity(node_count);

    for (id, &record_index) in normalized
        .node_ids()
        .iter()
        .zip(normalized.node_record_indices())
    {
        let idx = graph.add_node(NodeWeight {
            id: id.clone(),
            record_index,
        });
        id_to_index.insert(id.clone(), idx);
        positions.push(idx);
    }

    let mut in_degree = vec![0usize; node_count];

    for edge in normalized.edges() {
        let Some(&source) = positions.get(edge.source) else {
            continue;
        };
        let Some(&target) = positions.get(edge.target) else {
            continue;
        };
        graph.add_edge(
            source,
            target,
            EdgeWeight {
                record_index: edge.record_index,
            },
        );
        if let Some(deg) = in_degree.get_mut(target.index()) {
            *deg += 1;
        }
    }

    CanonicalGraph {
        graph,
        id_to_index,
        in_degree,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
