/// Serde helper functions shared across the record types.
///
/// The editor does not guarantee identifier types: an id can arrive as a
/// number, a boolean or an object while a node is being edited.
/// [`deserialize_lenient_string`] accepts any JSON value for such fields and
/// keeps only strings, so a stray value degrades into "absent" instead of
/// failing the whole submission.
use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<String>` that maps every non-string to `None`.
///
/// | JSON                  | Rust result       |
/// |-----------------------|-------------------|
/// | field absent          | `None`            |
/// | `"field": null`       | `None`            |
/// | `"field": "a"`        | `Some("a")`       |
/// | `"field": 5`, `{..}`  | `None`            |
///
/// Use with `#[serde(default, deserialize_with = "...")]`; the `default`
/// covers the absent case.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => Ok(None),
    }
}
