//! Pipeline submission generator.
//!
//! Produces [`PipelineSubmission`] instances whose acyclicity is known in
//! advance, optionally salted with the records the normalizer must skip:
//! nodes without ids, duplicate ids, half-drawn and dangling edges.

pub mod records;
pub mod topology;

use pipedag_core::PipelineSubmission;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shape of the admissible edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// `n0 -> n1 -> ... -> n(k-1)`.
    Path,
    /// A path closed back onto its first node.
    Ring,
    /// Nodes split into `layers`; each node past the first layer receives
    /// `fan_in` edges from random nodes of the previous layer.
    Layered {
        /// Number of layers (at least 1).
        layers: usize,
        /// Incoming edges per node.
        fan_in: usize,
    },
    /// `edge_factor * n` edges between uniformly random endpoints,
    /// self-loops included.
    Random {
        /// Edges per node.
        edge_factor: usize,
    },
}

/// Configuration for the pipeline generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of distinct valid node ids.
    pub num_nodes: usize,
    /// Shape of the admissible edges.
    pub topology: Topology,
    /// Extra node records that repeat an existing id.
    pub duplicate_nodes: usize,
    /// Extra node records without an id.
    pub nodes_without_id: usize,
    /// Extra edges pointing at ids that do not exist.
    pub dangling_edges: usize,
    /// Extra edges missing their target.
    pub half_drawn_edges: usize,
    /// Reverse one admissible edge, creating a two-node cycle.
    pub inject_cycle: bool,
}

impl GeneratorConfig {
    /// A noise-free configuration.
    pub fn new(seed: u64, num_nodes: usize, topology: Topology) -> Self {
        Self {
            seed,
            num_nodes,
            topology,
            duplicate_nodes: 0,
            nodes_without_id: 0,
            dangling_edges: 0,
            half_drawn_edges: 0,
            inject_cycle: false,
        }
    }

    /// The expected `is_dag` verdict, or `None` for [`Topology::Random`].
    pub fn expected_is_dag(&self) -> Option<bool> {
        let has_edges = topology::has_edges(self.topology, self.num_nodes);
        match self.topology {
            Topology::Path | Topology::Layered { .. } => Some(!(self.inject_cycle && has_edges)),
            Topology::Ring => Some(!has_edges),
            Topology::Random { .. } => None,
        }
    }
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 50 nodes, ~100 edges
    Small,
    /// 500 nodes, ~1000 edges
    Medium,
    /// 5000 nodes, ~10000 edges
    Large,
    /// 50000 nodes, ~100000 edges
    XLarge,
}

impl SizeTier {
    /// Number of distinct node ids in this tier.
    pub fn num_nodes(self) -> usize {
        match self {
            SizeTier::Small => 50,
            SizeTier::Medium => 500,
            SizeTier::Large => 5_000,
            SizeTier::XLarge => 50_000,
        }
    }

    /// A layered DAG with a light sprinkle of malformed records, the way a
    /// half-finished editor canvas looks.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let n = self.num_nodes();
        GeneratorConfig {
            duplicate_nodes: n / 50,
            nodes_without_id: n / 100,
            dangling_edges: n / 25,
            half_drawn_edges: n / 50,
            ..GeneratorConfig::new(
                seed,
                n,
                Topology::Layered {
                    layers: (n / 10).max(2),
                    fan_in: 2,
                },
            )
        }
    }
}

/// Generates a pipeline submission from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`. Node and edge
/// records are shuffled so that submission order carries no structure.
pub fn generate_pipeline(config: &GeneratorConfig) -> PipelineSubmission {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut pairs = topology::build_edges(config.topology, config.num_nodes, &mut rng);
    if config.inject_cycle {
        topology::reverse_one(&mut pairs, &mut rng);
    }

    let mut nodes = records::build_nodes(config.num_nodes);
    let mut edges = records::build_edges(&pairs);

    records::add_node_noise(
        &mut nodes,
        config.num_nodes,
        config.duplicate_nodes,
        config.nodes_without_id,
        &mut rng,
    );
    records::add_edge_noise(
        &mut edges,
        config.num_nodes,
        config.dangling_edges,
        config.half_drawn_edges,
        &mut rng,
    );

    nodes.shuffle(&mut rng);
    edges.shuffle(&mut rng);

    PipelineSubmission::new(nodes, edges)
}

/// Serializes a submission to the JSON body the editor would post.
///
/// # Errors
///
/// Returns the serializer error; generated records always serialize.
pub fn to_json(submission: &PipelineSubmission) -> Result<String, serde_json::Error> {
    serde_json::to_string(submission)
}
