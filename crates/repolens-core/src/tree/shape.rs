//! Structural classification of raw tree values

use serde_json::Value;

/// The closed set of raw tree shapes understood by the normalizer.
///
/// Classification looks only at structure, in a fixed priority order:
/// text, wrapper object, list of records, list of plain paths.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTree<'a> {
    /// Multi-line text, two spaces per level, directories end in `/`
    Indented(&'a str),
    /// An object holding the real tree under `tree` or `children`
    Wrapper(Option<&'a Value>),
    /// A list of records carrying `type`, `name`/`path` and `children`
    Nested(&'a [Value]),
    /// A list of slash-separated path strings
    FlatPaths(Vec<&'a str>),
    /// Anything else, including empty values
    Unrecognized,
}

impl<'a> RawTree<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::String(text) if !text.trim().is_empty() => Self::Indented(text),
            Value::Object(map) => {
                let inner = ["tree", "children"]
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find(|value| is_present(value));
                Self::Wrapper(inner)
            }
            Value::Array(items) if items.iter().any(Value::is_object) => Self::Nested(items),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_string) => {
                Self::FlatPaths(items.iter().filter_map(Value::as_str).collect())
            }
            _ => Self::Unrecognized,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Indented(_) => "indented",
            Self::Wrapper(_) => "wrapper",
            Self::Nested(_) => "nested",
            Self::FlatPaths(_) => "flat_paths",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Mirrors "truthy" presence: null and empty containers do not count.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

