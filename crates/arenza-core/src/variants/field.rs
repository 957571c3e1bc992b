//! Decoding of the persisted variant column, in all of its historical shapes,
//! and encoding back to the single shape written today.

use serde_json::{Map, Value};

use super::normalize::{normalize_fields, normalize_keyed_entry, SIZE_KEYS};
use super::{is_truthy, normalize_variant_entry, Variant};

/// The shapes the persisted variant column has been written in.
///
/// [`RawVariantField::classify`] tags a raw value; [`RawVariantField::decode`]
/// turns the tagged value into canonical variants. Shapes are tried in a fixed
/// order: JSON text, list, single record (has a size key), keyed mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawVariantField<'a> {
    /// JSON text wrapping any of the other shapes.
    Encoded(&'a str),
    /// A list of variant-like records.
    List(&'a [Value]),
    /// One variant-like record.
    Single(&'a Map<String, Value>),
    /// A mapping from size label to a prints value.
    Keyed(&'a Map<String, Value>),
}

impl<'a> RawVariantField<'a> {
    /// Tags `raw` with its shape, or returns `None` for empty and scalar values.
    #[must_use]
    pub fn classify(raw: &'a Value) -> Option<Self> {
        if !is_truthy(raw) {
            return None;
        }

        match raw {
            Value::Array(items) => Some(Self::List(items)),
            Value::String(text) => Some(Self::Encoded(text)),
            Value::Object(fields) if SIZE_KEYS.iter().any(|key| fields.contains_key(*key)) => {
                Some(Self::Single(fields))
            }
            Value::Object(fields) => Some(Self::Keyed(fields)),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    /// Decodes the tagged value. Records that normalize to nothing are dropped;
    /// order is preserved.
    #[must_use]
    pub fn decode(self) -> Vec<Variant> {
        match self {
            Self::Encoded(text) => match serde_json::from_str::<Value>(text) {
                Ok(decoded) => parse_variant_field(&decoded),
                Err(e) => {
                    tracing::warn!(error = %e, "variant field is not valid JSON; ignoring it");
                    Vec::new()
                }
            },
            Self::List(items) => items.iter().filter_map(normalize_variant_entry).collect(),
            Self::Single(fields) => normalize_fields(fields).into_iter().collect(),
            Self::Keyed(fields) => fields
                .iter()
                .filter_map(|(size, prints)| normalize_keyed_entry(size, prints))
                .collect(),
        }
    }
}

/// Parses a persisted variant field of any shape into canonical variants.
///
/// This never fails: malformed JSON text and unrecognized shapes yield an
/// empty list (the former is logged), so a product with damaged variant data
/// still renders.
#[must_use]
pub fn parse_variant_field(raw: &Value) -> Vec<Variant> {
    RawVariantField::classify(raw).map_or_else(Vec::new, RawVariantField::decode)
}

/// Encodes variants for storage as JSON text of `{size, prints}` records.
///
/// An empty list encodes to `None`, stored as `null`.
#[must_use]
pub fn encode_variant_field(variants: &[Variant]) -> Option<String> {
    if variants.is_empty() {
        return None;
    }
    let records = variants.iter().map(Variant::to_value).collect();
    Some(Value::Array(records).to_string())
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;
