/// Graph normalization: raw records in, canonical identifier set and
/// admissible edges out.
///
/// Normalization is permissive. Nothing in a submission can make it fail:
///
/// - a node without a usable id (absent, `null`, `""` or not a string) is
///   skipped;
/// - a node whose id was already seen is skipped (**first occurrence wins**);
/// - an edge without a string source or target is skipped;
/// - an edge naming an id outside the canonical set (a *dangling* edge) is
///   skipped.
///
/// Every skip is counted in [`NormalizeStats`] so callers can report how
/// much of the submission was ignored. The input slices are never mutated;
/// [`normalize`] returns a fresh [`NormalizedGraph`].
use std::collections::HashMap;

use crate::newtypes::NodeId;
use crate::structures::{EdgeRecord, NodeRecord};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Counts of records dropped during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct NormalizeStats {
    /// Node records with an absent, `null`, empty or non-string id.
    pub nodes_missing_id: usize,
    /// Node records whose id repeats an earlier record.
    pub duplicate_node_ids: usize,
    /// Edge records with an absent, empty or non-string source or target.
    pub edges_missing_endpoint: usize,
    /// Edge records whose source or target is not in the canonical node set.
    pub dangling_edges: usize,
}

impl NormalizeStats {
    /// Total number of node records that did not contribute to the node set.
    pub fn dropped_nodes(&self) -> usize {
        self.nodes_missing_id + self.duplicate_node_ids
    }

    /// Total number of edge records excluded from the graph.
    pub fn dropped_edges(&self) -> usize {
        self.edges_missing_endpoint + self.dangling_edges
    }

    /// Returns `true` if every record was used.
    pub fn is_clean(&self) -> bool {
        self.dropped_nodes() == 0 && self.dropped_edges() == 0
    }
}

/// An edge whose endpoints are both members of the canonical node set.
///
/// Endpoints are positions into [`NormalizedGraph::node_ids`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissibleEdge {
    /// Position of the source node.
    pub source: usize,
    /// Position of the target node.
    pub target: usize,
    /// Index of the originating record in the submitted edge list.
    pub record_index: usize,
}

/// Result of [`normalize`]: the canonical node set and admissible edges.
#[derive(Debug, Clone, Default)]
pub struct NormalizedGraph {
    node_ids: Vec<NodeId>,
    node_record_indices: Vec<usize>,
    edges: Vec<AdmissibleEdge>,
    raw_edge_count: usize,
    stats: NormalizeStats,
}

impl NormalizedGraph {
    /// Canonical node identifiers in first-occurrence order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// For each canonical node, the index of the record that defined it.
    pub fn node_record_indices(&self) -> &[usize] {
        &self.node_record_indices
    }

    /// Admissible edges in submission order.
    pub fn edges(&self) -> &[AdmissibleEdge] {
        &self.edges
    }

    /// Number of distinct valid node identifiers.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of edge records submitted, admissible or not.
    pub fn raw_edge_count(&self) -> usize {
        self.raw_edge_count
    }

    /// Drop counters collected while normalizing.
    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Builds the canonical node set and admissible edge list from raw records.
///
/// Runs in O(N + E): one pass over `nodes` to build the identifier index,
/// one pass over `edges` to resolve endpoints against it.
pub fn normalize(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> NormalizedGraph {
    let mut stats = NormalizeStats::default();
    let mut node_ids: Vec<NodeId> = Vec::with_capacity(nodes.len());
    let mut node_record_indices: Vec<usize> = Vec::with_capacity(nodes.len());
    let mut position_of: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());

    for (record_index, node) in nodes.iter().enumerate() {
        let Some(raw) = node.id.as_deref() else {
            stats.nodes_missing_id += 1;
            continue;
        };
        let Ok(id) = NodeId::try_from(raw) else {
            stats.nodes_missing_id += 1;
            continue;
        };
        if position_of.contains_key(raw) {
            stats.duplicate_node_ids += 1;
            continue;
        }
        position_of.insert(raw, node_ids.len());
        node_ids.push(id);
        node_record_indices.push(record_index);
    }

    let mut admissible: Vec<AdmissibleEdge> = Vec::with_capacity(edges.len());

    for (record_index, edge) in edges.iter().enumerate() {
        let Some((source_id, target_id)) = edge.endpoints() else {
            stats.edges_missing_endpoint += 1;
            continue;
        };
        if let (Some(&source), Some(&target)) =
            (position_of.get(source_id), position_of.get(target_id))
        {
            admissible.push(AdmissibleEdge {
                source,
                target,
                record_index,
            });
        } else {
            stats.dangling_edges += 1;
        }
    }

    tracing::debug!(
        nodes = node_ids.len(),
        admissible_edges = admissible.len(),
        nodes_missing_id = stats.nodes_missing_id,
        duplicate_node_ids = stats.duplicate_node_ids,
        edges_missing_endpoint = stats.edges_missing_endpoint,
        dangling_edges = stats.dangling_edges,
        "normalized pipeline"
    );

    NormalizedGraph {
        node_ids,
        node_record_indices,
        edges: admissible,
        raw_edge_count: edges.len(),
        stats,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
