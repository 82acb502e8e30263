//! Node and edge record builders in the editor's JSON shape.

use pipedag_core::{EdgeRecord, NodeRecord};
use rand::Rng;
use rand::rngs::StdRng;
use serde_json::json;

const NODE_TYPES: [&str; 5] = ["customInput", "text", "llm", "transform", "customOutput"];

/// Editor-style id for the node at `position`, e.g. `llm-12`.
pub fn node_id(position: usize) -> String {
    format!("{}-{position}", NODE_TYPES[position % NODE_TYPES.len()])
}

fn node_record(position: usize) -> NodeRecord {
    let id = node_id(position);
    let node_type = NODE_TYPES[position % NODE_TYPES.len()];
    let mut node = NodeRecord::new(id.clone());
    node.node_type = Some(node_type.to_owned());
    node.position = Some(json!({
        "x": (position % 40) as f64 * 260.0,
        "y": (position / 40) as f64 * 160.0,
    }));
    node.data = Some(json!({ "id": id, "nodeType": node_type }));
    node.extra.insert("width".to_owned(), json!(220));
    node.extra.insert("height".to_owned(), json!(120));
    node
}

fn edge_record(source: &str, target: &str, ordinal: usize) -> EdgeRecord {
    let mut edge = EdgeRecord::new(source, target);
    edge.id = Some(format!("reactflow__edge-{source}-{target}-{ordinal}"));
    edge.edge_type = Some("smoothstep".to_owned());
    edge.extra.insert(
        "sourceHandle".to_owned(),
        json!(format!("{source}-output")),
    );
    edge.extra.insert(
        "targetHandle".to_owned(),
        json!(format!("{target}-input")),
    );
    edge.extra.insert("animated".to_owned(), json!(true));
    edge
}

/// One record per node position, in position order.
pub fn build_nodes(n: usize) -> Vec<NodeRecord> {
    (0..n).map(node_record).collect()
}

/// One record per `(source, target)` position pair.
pub fn build_edges(pairs: &[(usize, usize)]) -> Vec<EdgeRecord> {
    pairs
        .iter()
        .enumerate()
        .map(|(ordinal, &(s, t))| edge_record(&node_id(s), &node_id(t), ordinal))
        .collect()
}

/// Appends node records the normalizer skips: repeats of existing ids and
/// records without an id.
pub fn add_node_noise(
    nodes: &mut Vec<NodeRecord>,
    n: usize,
    duplicates: usize,
    without_id: usize,
    rng: &mut StdRng,
) {
    if n > 0 {
        for _ in 0..duplicates {
            let mut dup = node_record(rng.gen_range(0..n));
            dup.node_type = Some("note".to_owned());
            nodes.push(dup);
        }
    }
    for k in 0..without_id {
        let mut orphan = node_record(n + k);
        orphan.id = None;
        nodes.push(orphan);
    }
}

/// Appends edge records the normalizer skips: edges into ids that do not
/// exist and edges whose target was never connected.
pub fn add_edge_noise(
    edges: &mut Vec<EdgeRecord>,
    n: usize,
    dangling: usize,
    half_drawn: usize,
    rng: &mut StdRng,
) {
    let base = edges.len();
    for k in 0..dangling {
        let source = if n > 0 {
            node_id(rng.gen_range(0..n))
        } else {
            format!("ghost-src-{k}")
        };
        edges.push(edge_record(&source, &format!("ghost-{k}"), base + k));
    }
    if n > 0 {
        for k in 0..half_drawn {
            let mut edge = edge_record(&node_id(rng.gen_range(0..n)), "", base + dangling + k);
            edge.target = None;
            edges.push(edge);
        }
    }
}
