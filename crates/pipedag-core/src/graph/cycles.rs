/// Acyclicity checking with Kahn's algorithm.
///
/// # Algorithm Overview
///
/// Kahn's algorithm starts from the in-degree table of the
/// [`CanonicalGraph`], seeds a FIFO queue with every zero-in-degree node,
/// then repeatedly pops a node, counts it as processed and decrements the
/// in-degree of each successor (once per edge, so parallel edges need one
/// decrement each). A successor enters the queue at the moment its
/// in-degree reaches exactly zero, which happens at most once per node.
///
/// The graph is acyclic iff every node gets processed. Nodes left over sit
/// on, or downstream of, a cycle: each keeps a positive in-degree that no
/// processed node can release. A self-loop is the one-node case.
///
/// Only the processed *count* decides the verdict. The order in which
/// zero-in-degree nodes are seeded or dequeued has no effect on it.
use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::graph::CanonicalGraph;

// ---------------------------------------------------------------------------
// KahnOutcome
// ---------------------------------------------------------------------------

/// Result of running Kahn's algorithm over a [`CanonicalGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KahnOutcome {
    order: Vec<NodeIndex>,
    node_count: usize,
}

impl KahnOutcome {
    /// Number of nodes that reached in-degree zero and were processed.
    pub fn processed_count(&self) -> usize {
        self.order.len()
    }

    /// Number of nodes in the checked graph.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of nodes never processed (zero iff acyclic).
    pub fn unprocessed_count(&self) -> usize {
        self.node_count - self.order.len()
    }

    /// Returns `true` if every node was processed, i.e. the graph is a DAG.
    pub fn is_acyclic(&self) -> bool {
        self.order.len() == self.node_count
    }

    /// The processing order when the graph is acyclic.
    ///
    /// This is a valid topological order, but which one among several valid
    /// orders is not guaranteed. Returns `None` for a cyclic graph.
    pub fn topological_order(&self) -> Option<&[NodeIndex]> {
        self.is_acyclic().then_some(self.order.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Runs Kahn's algorithm over `graph`.
///
/// Works on a private copy of the in-degree table, so `graph` is never
/// modified and repeated calls return equal outcomes. O(V + E) time and
/// space; cannot fail.
pub fn kahn(graph: &CanonicalGraph) -> KahnOutcome {
    let g = graph.graph();
    let node_count = graph.node_count();
    let mut in_degree: Vec<usize> = graph.in_degrees().to_vec();

    let mut queue: VecDeque<NodeIndex> = g
        .node_indices()
        .filter(|idx| in_degree.get(idx.index()).copied() == Some(0))
        .collect();

    let mut order: Vec<NodeIndex> = Vec::with_capacity(node_count);

    while let Some(node) = queue.pop_front() {
        order.push(node);

        for succ in graph.successors(node) {
            if let Some(deg) = in_degree.get_mut(succ.index()) {
                if *deg > 0 {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(succ);
                    }
                }
            }
        }
    }

    let outcome = KahnOutcome { order, node_count };
    tracing::debug!(
        processed = outcome.processed_count(),
        nodes = node_count,
        acyclic = outcome.is_acyclic(),
        "kahn pass finished"
    );
    outcome
}

/// Returns `true` if `graph` contains no directed cycle.
///
/// Self-loops count as cycles. The empty graph is acyclic.
pub fn is_dag(graph: &CanonicalGraph) -> bool {
    kahn(graph).is_acyclic()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
