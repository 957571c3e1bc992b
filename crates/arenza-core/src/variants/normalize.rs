//! Conversion of one loosely-typed variant record into a [`Variant`].

use serde_json::{Map, Value};

use super::{is_truthy, Variant};

/// Key names a record may use for its size, in lookup order.
pub(crate) const SIZE_KEYS: [&str; 2] = ["size", "tamanho"];

/// Key names a record may use for its prints, in lookup order. The first
/// key holding a truthy value wins.
const PRINTS_KEYS: [&str; 4] = ["prints", "estampas", "options", "value"];

/// Normalizes one variant-like record.
///
/// Returns `None` when the value is not an object, has no usable size, or
/// has no non-empty prints after trimming. Never panics and never errors.
#[must_use]
pub fn normalize_variant_entry(entry: &Value) -> Option<Variant> {
    match entry {
        Value::Object(fields) => normalize_fields(fields),
        _ => None,
    }
}

/// Normalizes one entry of a `{ size: prints }` mapping.
pub(crate) fn normalize_keyed_entry(size: &str, prints: &Value) -> Option<Variant> {
    let mut fields = Map::new();
    fields.insert("size".to_owned(), Value::String(size.to_owned()));
    fields.insert("prints".to_owned(), prints.clone());
    normalize_fields(&fields)
}

pub(crate) fn normalize_fields(fields: &Map<String, Value>) -> Option<Variant> {
    let size = first_truthy(fields, &SIZE_KEYS)
        .and_then(scalar_text)
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())?;

    let prints = sanitize_prints(first_truthy(fields, &PRINTS_KEYS));
    if prints.is_empty() {
        return None;
    }

    Some(Variant { size, prints })
}

fn first_truthy<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| is_truthy(value))
}

/// Text form of a scalar. Objects and arrays have no meaningful text form here.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Flattens a prints value (comma string, array, or mapping whose keys are
/// discarded) into trimmed, non-empty entries, preserving order.
fn sanitize_prints(source: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match source {
        Some(Value::String(joined)) => joined.split(',').map(str::to_owned).collect(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::Object(map)) => map.values().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}
