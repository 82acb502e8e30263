/// Pipeline analysis: normalize, build, check, summarize.
///
/// [`analyze`] is the per-request entry point used by the HTTP endpoint. It
/// allocates every intermediate structure locally, so concurrent calls share
/// nothing.
///
/// # Counting contract
///
/// - `num_nodes` is the number of **distinct valid** node identifiers, i.e.
///   the size of the node set the checker reasons about. Records without an
///   id and repeated ids are not counted.
/// - `num_edges` is the number of edge records **submitted**, including
///   half-drawn and dangling ones. The editor uses it to show how many edges
///   the user drew, not how many were usable.
use serde::{Deserialize, Serialize};

use crate::graph::{KahnOutcome, build_graph, kahn};
use crate::normalize::{NormalizeStats, normalize};
use crate::submission::PipelineSubmission;

/// Structural facts about a submitted pipeline.
///
/// Serializes to the response body `{num_nodes, num_edges, is_dag}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Distinct valid node identifiers.
    pub num_nodes: usize,
    /// Edge records submitted, admissible or not.
    pub num_edges: usize,
    /// Whether the admissible graph has no directed cycle.
    pub is_dag: bool,
}

/// A [`PipelineSummary`] together with the diagnostics behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// The summary returned to clients.
    pub summary: PipelineSummary,
    /// Records dropped during normalization.
    pub stats: NormalizeStats,
    /// Number of edges that made it into the graph.
    pub admissible_edges: usize,
    /// Raw Kahn result.
    pub outcome: KahnOutcome,
}

/// Analyzes a submission and returns its summary.
pub fn analyze(submission: &PipelineSubmission) -> PipelineSummary {
    analyze_detailed(submission).summary
}

/// Analyzes a submission and returns the summary plus diagnostics.
pub fn analyze_detailed(submission: &PipelineSubmission) -> PipelineReport {
    let normalized = normalize(&submission.nodes, &submission.edges);
    let graph = build_graph(&normalized);
    let outcome = kahn(&graph);

    let summary = PipelineSummary {
        num_nodes: normalized.node_count(),
        num_edges: normalized.raw_edge_count(),
        is_dag: outcome.is_acyclic(),
    };

    tracing::debug!(
        num_nodes = summary.num_nodes,
        num_edges = summary.num_edges,
        admissible_edges = graph.edge_count(),
        is_dag = summary.is_dag,
        "analyzed pipeline"
    );

    PipelineReport {
        summary,
        stats: normalized.stats(),
        admissible_edges: graph.edge_count(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use serde_json::json;

    use super::*;
    use crate::structures::NodeRecord;
    use crate::submission::parse_submission;
    use crate::test_helpers::submission;

    fn summary(num_nodes: usize, num_edges: usize, is_dag: bool) -> PipelineSummary {
        PipelineSummary {
            num_nodes,
            num_edges,
            is_dag,
        }
    }

    #[test]
    fn single_edge() {
        let s = analyze(&submission(&["A", "B"], &[("A", "B")]));
        assert_eq!(s, summary(2, 1, true));
    }

    #[test]
    fn two_node_cycle() {
        let s = analyze(&submission(&["A", "B"], &[("A", "B"), ("B", "A")]));
        assert_eq!(s, summary(2, 2, false));
    }

    #[test]
    fn self_loop() {
        let s = analyze(&submission(&["A"], &[("A", "A")]));
        assert_eq!(s, summary(1, 1, false));
    }

    #[test]
    fn empty_pipeline() {
        let s = analyze(&submission(&[], &[]));
        assert_eq!(s, summary(0, 0, true));
    }

    #[test]
    fn dangling_edge_is_counted_but_ignored() {
        let s = analyze(&submission(&["A"], &[("A", "X")]));
        assert_eq!(s, summary(1, 1, true));
    }

    #[test]
    fn dangling_edge_closing_a_ring_is_ignored() {
        let s = analyze(&submission(&["A", "B"], &[("A", "B"), ("B", "X"), ("X", "A")]));
        assert_eq!(s, summary(2, 3, true));
    }

    #[test]
    fn duplicate_and_missing_ids_do_not_count() {
        let mut sub = submission(&["A", "B", "A"], &[("A", "B")]);
        sub.nodes.push(NodeRecord::default());
        sub.nodes.push(NodeRecord::new(""));
        let report = analyze_detailed(&sub);
        assert_eq!(report.summary, summary(2, 1, true));
        assert_eq!(report.stats.duplicate_node_ids, 1);
        assert_eq!(report.stats.nodes_missing_id, 2);
    }

    #[test]
    fn report_counts_admissible_edges() {
        let report = analyze_detailed(&submission(&["A", "B"], &[("A", "B"), ("A", "Z")]));
        assert_eq!(report.admissible_edges, 1);
        assert_eq!(report.stats.dangling_edges, 1);
        assert_eq!(report.outcome.processed_count(), 2);
    }

    #[test]
    fn summary_serializes_to_response_shape() {
        let value = serde_json::to_value(summary(3, 2, true)).expect("serializes");
        assert_eq!(value, json!({"num_nodes": 3, "num_edges": 2, "is_dag": true}));
    }

    #[test]
    fn editor_payload_end_to_end() {
        let body = r#"{
            "nodes": [
                {"id": "customInput-1", "type": "customInput", "position": {"x": 0, "y": 0},
                 "data": {"id": "customInput-1", "nodeType": "customInput"}},
                {"id": "llm-1", "type": "llm", "position": {"x": 300, "y": 0}, "data": {}},
                {"id": "customOutput-1", "type": "customOutput", "position": {"x": 600, "y": 0}}
            ],
            "edges": [
                {"id": "e1", "source": "customInput-1", "sourceHandle": "customInput-1-value",
                 "target": "llm-1", "targetHandle": "llm-1-prompt", "type": "smoothstep",
                 "animated": true},
                {"id": "e2", "source": "llm-1", "target": "customOutput-1", "type": "smoothstep"},
                {"id": "e3", "source": "llm-1"}
            ]
        }"#;
        let sub = parse_submission(body).expect("parses");
        assert_eq!(analyze(&sub), summary(3, 3, true));
    }

    #[test]
    fn non_string_identifiers_are_dropped_not_rejected() {
        let sub = parse_submission(
            r#"{"nodes": [{"id": "A"}, {"id": 7}], "edges": [{"source": "A", "target": 5}]}"#,
        )
        .expect("parses");
        let report = analyze_detailed(&sub);
        assert_eq!(report.summary, summary(1, 1, true));
        assert_eq!(report.stats.nodes_missing_id, 1);
        assert_eq!(report.stats.edges_missing_endpoint, 1);
    }
}
