//! Post-analysis invariant tests using generated data.
#![allow(clippy::expect_used)]

use pipedag_bench::correctness;
use pipedag_bench::{GeneratorConfig, SizeTier, Topology, generate_pipeline, to_json};
use pipedag_core::{analyze, analyze_detailed, build_graph, kahn, normalize, parse_submission};

fn check_all(config: &GeneratorConfig) {
    let submission = generate_pipeline(config);
    let summary = analyze(&submission);
    correctness::check_summary_counts(&submission, &summary).expect("counting rules hold");

    let graph = build_graph(&normalize(&submission.nodes, &submission.edges));
    let outcome = kahn(&graph);
    correctness::check_verdict_matches_petgraph(&graph, &outcome).expect("verdicts agree");
    correctness::check_topological_order(&graph, &outcome).expect("order is topological");
    correctness::check_unprocessed_on_cycle(&graph, &outcome).expect("cycle leaves residue");

    if let Some(expected) = config.expected_is_dag() {
        assert_eq!(summary.is_dag, expected, "config: {config:?}");
    }
}

#[test]
fn size_tiers_are_dags() {
    for tier in [SizeTier::Small, SizeTier::Medium, SizeTier::Large] {
        for seed in [42, 123, 999] {
            let config = tier.config(seed);
            assert_eq!(config.expected_is_dag(), Some(true));
            check_all(&config);
        }
    }
}

#[test]
fn size_tier_with_injected_cycle() {
    for seed in [42, 123, 999] {
        let config = GeneratorConfig {
            inject_cycle: true,
            ..SizeTier::Medium.config(seed)
        };
        assert_eq!(config.expected_is_dag(), Some(false));
        check_all(&config);
    }
}

#[test]
fn every_topology_holds_invariants() {
    let topologies = [
        Topology::Path,
        Topology::Ring,
        Topology::Layered {
            layers: 8,
            fan_in: 3,
        },
        Topology::Random { edge_factor: 1 },
        Topology::Random { edge_factor: 3 },
    ];
    for topology in topologies {
        for n in [0, 1, 2, 17, 300] {
            check_all(&GeneratorConfig::new(7, n, topology));
            check_all(&GeneratorConfig {
                inject_cycle: true,
                dangling_edges: 5,
                half_drawn_edges: 2,
                duplicate_nodes: 3,
                nodes_without_id: 2,
                ..GeneratorConfig::new(7, n, topology)
            });
        }
    }
}

#[test]
fn noise_only_changes_edge_count() {
    let clean = GeneratorConfig::new(
        5,
        200,
        Topology::Layered {
            layers: 20,
            fan_in: 2,
        },
    );
    let noisy = GeneratorConfig {
        duplicate_nodes: 10,
        nodes_without_id: 4,
        dangling_edges: 30,
        half_drawn_edges: 6,
        ..clean.clone()
    };
    let a = analyze(&generate_pipeline(&clean));
    let b = analyze(&generate_pipeline(&noisy));
    assert_eq!(a.num_nodes, b.num_nodes);
    assert_eq!(a.is_dag, b.is_dag);
    assert_eq!(b.num_edges, a.num_edges + 36);

    let report = analyze_detailed(&generate_pipeline(&noisy));
    assert_eq!(report.stats.duplicate_node_ids, 10);
    assert_eq!(report.stats.nodes_missing_id, 4);
    assert_eq!(report.stats.dangling_edges, 30);
    assert_eq!(report.stats.edges_missing_endpoint, 6);
}

#[test]
fn json_body_round_trips_to_same_summary() {
    let submission = generate_pipeline(&SizeTier::Small.config(42));
    let body = to_json(&submission).expect("serializes");
    let reparsed = parse_submission(&body).expect("parses");
    assert_eq!(analyze(&reparsed), analyze(&submission));
}

#[test]
fn generation_is_deterministic() {
    let config = SizeTier::Small.config(3);
    assert_eq!(generate_pipeline(&config), generate_pipeline(&config));
}
