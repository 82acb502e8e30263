/// Raw node and edge records as submitted by a graph-editing client.
///
/// Records are deliberately loose: every field is optional so that a
/// half-drawn pipeline (an edge without a target, a node whose id has not
/// been assigned yet) still deserializes. Validity is decided later by the
/// normalizer, not here.
///
/// Key design decisions:
/// - Identifier fields are `Option<String>`; JSON `null`, an absent key and
///   any non-string value all map to `None`, so the record is kept and the
///   normalizer drops it from the graph.
/// - Visual metadata (`position`, `data`) is kept as raw JSON and never
///   interpreted by the graph code.
/// - `#[serde(flatten)] pub extra` preserves every field this crate does not
///   model (`sourceHandle`, `width`, `selected`, ...) across round trips.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Canvas coordinates of a node, as reported by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

// ---------------------------------------------------------------------------
// NodeRecord
// ---------------------------------------------------------------------------

/// A single node record from a pipeline submission.
///
/// Only [`NodeRecord::id`] participates in graph construction. A record
/// whose id is missing or empty is excluded from the graph without failing
/// the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier; valid only when present and non-empty.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_lenient_string"
    )]
    pub id: Option<String>,

    /// Editor-defined node kind (e.g. `"customInput"`, `"llm"`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Canvas position as raw JSON.
    ///
    /// Use [`NodeRecord::position_parsed`] to read it as a typed [`Position`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<serde_json::Value>,

    /// Free-form node payload (field values, handles, labels).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Unknown fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeRecord {
    /// Creates a record carrying only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns the identifier if it is present and non-empty.
    pub fn valid_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Interprets [`NodeRecord::position`] as a [`Position`].
    ///
    /// Returns `None` when the position is absent or not an `{x, y}` object
    /// with numeric coordinates.
    pub fn position_parsed(&self) -> Option<Position> {
        self.position
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

// ---------------------------------------------------------------------------
// EdgeRecord
// ---------------------------------------------------------------------------

/// A single directed edge record from a pipeline submission.
///
/// An edge is admissible only when both [`EdgeRecord::source`] and
/// [`EdgeRecord::target`] name nodes in the canonical node set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge identifier; carried for echo and debugging only.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_lenient_string"
    )]
    pub id: Option<String>,

    /// Identifier of the node the edge leaves.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_lenient_string"
    )]
    pub source: Option<String>,

    /// Identifier of the node the edge enters.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_helpers::deserialize_lenient_string"
    )]
    pub target: Option<String>,

    /// Editor-defined edge kind (e.g. `"smoothstep"`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,

    /// Unknown fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EdgeRecord {
    /// Creates a record with a source and target and nothing else.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Returns the `(source, target)` pair when both endpoints are present
    /// and non-empty.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let source = self.source.as_deref().filter(|s| !s.is_empty())?;
        let target = self.target.as_deref().filter(|t| !t.is_empty())?;
        Some((source, target))
    }

}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
