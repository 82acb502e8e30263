#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod analysis;
pub mod graph;
pub mod newtypes;
pub mod normalize;
pub mod serde_helpers;
pub mod structures;
pub mod submission;

#[cfg(test)]
mod test_helpers;

pub use analysis::{PipelineReport, PipelineSummary, analyze, analyze_detailed};
pub use graph::{
    CanonicalGraph, EdgeWeight, KahnOutcome, NodeWeight, build_graph, is_dag, kahn,
};
pub use newtypes::{NewtypeError, NodeId};
pub use normalize::{AdmissibleEdge, NormalizeStats, NormalizedGraph, normalize};
pub use structures::{EdgeRecord, NodeRecord, Position};
pub use submission::{PipelineSubmission, SubmissionParseError, parse_submission};

/// Returns the current version of the pipedag-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
