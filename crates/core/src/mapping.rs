//! Dotted-path resolution and declarative field mapping.
//!
//! Import configurations carry a mapping table of canonical field name →
//! dotted source path (e.g. `"email" → "contact.email"`). [`map_fields`]
//! applies that table to a raw platform payload to produce the canonical
//! lead field map. Resolution is modeled explicitly via [`FieldValue`] so
//! behaviour on missing or partial paths is exhaustively specified instead
//! of relying on untyped null-propagation.

use serde_json::{Map, Value};

/// Result of resolving one dotted path against a raw payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The path did not resolve: a missing key, a non-object intermediate,
    /// or an explicit JSON null anywhere along the path.
    Absent,
    /// The path resolved to a scalar (string, number, bool, or array leaf).
    Scalar(Value),
    /// The path resolved to a JSON object.
    Nested(Map<String, Value>),
}

impl FieldValue {
    /// Convert back into a plain JSON value, or `None` when absent.
    pub fn into_value(self) -> Option<Value> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Scalar(v) => Some(v),
            FieldValue::Nested(m) => Some(Value::Object(m)),
        }
    }
}

/// Resolve a dotted path (`"contact.email"`) against a raw payload.
///
/// Each segment must index into a JSON object; any missing intermediate key
/// short-circuits to [`FieldValue::Absent`]. JSON nulls are treated as
/// absent rather than surfaced as a value.
pub fn resolve_path(raw: &Value, path: &str) -> FieldValue {
    let mut current = raw;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => return FieldValue::Absent,
            },
            _ => return FieldValue::Absent,
        }
    }
    match current {
        Value::Null => FieldValue::Absent,
        Value::Object(map) => FieldValue::Nested(map.clone()),
        other => FieldValue::Scalar(other.clone()),
    }
}

/// Apply a mapping table to a raw payload, producing the canonical field map.
///
/// Only fields whose path resolves to a defined value are emitted; absent
/// paths are omitted entirely (never null or empty string). Mapping entries
/// whose path is not a string are skipped. Pure and deterministic.
pub fn map_fields(raw: &Value, mapping: &Map<String, Value>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (canonical, path) in mapping {
        let Some(path) = path.as_str() else {
            continue;
        };
        if let Some(value) = resolve_path(raw, path).into_value() {
            fields.insert(canonical.clone(), value);
        }
    }
    fields
}
