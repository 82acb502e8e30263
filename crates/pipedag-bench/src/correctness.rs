//! Post-analysis invariant checkers for correctness validation.

use std::collections::HashSet;

use pipedag_core::{CanonicalGraph, KahnOutcome, PipelineSubmission, PipelineSummary};

/// Verifies the counting rules of a summary against its submission:
/// `num_nodes` is the number of distinct non-empty ids, `num_edges` the
/// number of edge records.
pub fn check_summary_counts(
    submission: &PipelineSubmission,
    summary: &PipelineSummary,
) -> Result<(), String> {
    let distinct: HashSet<&str> = submission
        .nodes
        .iter()
        .filter_map(|n| n.valid_id())
        .collect();
    if summary.num_nodes != distinct.len() {
        return Err(format!(
            "node count mismatch: summary={}, distinct ids={}",
            summary.num_nodes,
            distinct.len()
        ));
    }
    if summary.num_edges != submission.edges.len() {
        return Err(format!(
            "edge count mismatch: summary={}, records={}",
            summary.num_edges,
            submission.edges.len()
        ));
    }
    Ok(())
}

/// Verifies the Kahn verdict against petgraph's DFS-based cycle check.
pub fn check_verdict_matches_petgraph(
    graph: &CanonicalGraph,
    outcome: &KahnOutcome,
) -> Result<(), String> {
    let cyclic = petgraph::algo::is_cyclic_directed(graph.graph());
    if outcome.is_acyclic() == cyclic {
        return Err(format!(
            "verdict mismatch: kahn acyclic={}, petgraph cyclic={cyclic}",
            outcome.is_acyclic()
        ));
    }
    Ok(())
}

/// Verifies an acyclic outcome's order:
/// - every node appears exactly once
/// - every edge runs from an earlier position to a later one
///
/// Cyclic outcomes pass trivially.
pub fn check_topological_order(
    graph: &CanonicalGraph,
    outcome: &KahnOutcome,
) -> Result<(), String> {
    let Some(order) = outcome.topological_order() else {
        return Ok(());
    };
    if order.len() != graph.node_count() {
        return Err(format!(
            "order length {} != node count {}",
            order.len(),
            graph.node_count()
        ));
    }

    let mut position: Vec<Option<usize>> = vec![None; graph.node_count()];
    for (pos, idx) in order.iter().enumerate() {
        let slot = position
            .get_mut(idx.index())
            .ok_or_else(|| format!("node index {} out of range", idx.index()))?;
        if slot.is_some() {
            return Err(format!("node index {} appears twice", idx.index()));
        }
        *slot = Some(pos);
    }

    for edge in graph.graph().raw_edges() {
        let from = position[edge.source().index()];
        let to = position[edge.target().index()];
        if from >= to {
            return Err(format!(
                "edge {} -> {} runs backwards in the order",
                edge.source().index(),
                edge.target().index()
            ));
        }
    }
    Ok(())
}

/// Verifies that a cyclic outcome left at least two nodes unprocessed, or
/// one when the cycle is a self-loop.
pub fn check_unprocessed_on_cycle(
    graph: &CanonicalGraph,
    outcome: &KahnOutcome,
) -> Result<(), String> {
    if outcome.is_acyclic() {
        return Ok(());
    }
    let has_self_loop = graph
        .graph()
        .raw_edges()
        .iter()
        .any(|e| e.source() == e.target());
    let min = if has_self_loop { 1 } else { 2 };
    if outcome.unprocessed_count() < min {
        return Err(format!(
            "cyclic outcome left only {} unprocessed nodes",
            outcome.unprocessed_count()
        ));
    }
    Ok(())
}
