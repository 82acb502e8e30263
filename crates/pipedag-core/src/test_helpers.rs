//! Shared test helper functions for constructing test fixtures.
//!
//! This module is compiled only in test builds. Integration tests in
//! `crates/pipedag-core/tests/` define their own local helpers because they
//! link against the non-test library build where this module is not
//! available.

use crate::graph::{CanonicalGraph, build_graph};
use crate::normalize::normalize;
use crate::structures::{EdgeRecord, NodeRecord};
use crate::submission::PipelineSubmission;

/// Creates a [`NodeRecord`] carrying only an id.
pub fn node(id: &str) -> NodeRecord {
    NodeRecord::new(id)
}

/// Creates an [`EdgeRecord`] carrying only a source and target.
pub fn edge(source: &str, target: &str) -> EdgeRecord {
    EdgeRecord::new(source, target)
}

/// Creates a submission from node ids and `(source, target)` pairs.
pub fn submission(node_ids: &[&str], edges: &[(&str, &str)]) -> PipelineSubmission {
    PipelineSubmission::new(
        node_ids.iter().map(|id| node(id)).collect(),
        edges.iter().map(|(s, t)| edge(s, t)).collect(),
    )
}

/// Normalizes and builds a [`CanonicalGraph`] in one step.
pub fn canonical(node_ids: &[&str], edges: &[(&str, &str)]) -> CanonicalGraph {
    let sub = submission(node_ids, edges);
    build_graph(&normalize(&sub.nodes, &sub.edges))
}
