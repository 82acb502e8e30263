/// Top-level pipeline submission document and its JSON entry point.
///
/// A submission is the body the editor posts: two arrays, `nodes` and
/// `edges`. Both keys are required; any other top-level key is ignored.
use serde::{Deserialize, Serialize};

use crate::structures::{EdgeRecord, NodeRecord};

/// A complete pipeline as submitted by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSubmission {
    /// Node records in submission order.
    pub nodes: Vec<NodeRecord>,
    /// Edge records in submission order.
    pub edges: Vec<EdgeRecord>,
}

impl PipelineSubmission {
    /// Builds a submission from already-constructed records.
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { nodes, edges }
    }
}

/// Error returned by [`parse_submission`] when the input is not a
/// structurally valid submission.
#[derive(Debug, thiserror::Error)]
#[error("invalid pipeline submission at line {line}, column {column}: {source}")]
pub struct SubmissionParseError {
    /// 1-based line of the first offending character.
    pub line: usize,
    /// 1-based column of the first offending character.
    pub column: usize,
    /// Underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Parses a JSON string into a [`PipelineSubmission`].
///
/// # Errors
///
/// Returns [`SubmissionParseError`] when the text is not JSON, when `nodes`
/// or `edges` is missing or not an array, or when a record is not a JSON
/// object. A non-string `id`, `source` or `target` is not an error; the
/// field reads as absent.
pub fn parse_submission(content: &str) -> Result<PipelineSubmission, SubmissionParseError> {
    serde_json::from_str(content).map_err(|source| SubmissionParseError {
        line: source.line(),
        column: source.column(),
        source,
    })
}
