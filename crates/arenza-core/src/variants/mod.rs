//! Canonical size/print variants and the decoders that produce them.
//!
//! Variant data reaches the catalog from three places: the persisted product
//! column (any of several historical JSON shapes), the admin text form, and
//! the per-size upload panel. Each source has its own decoder; all of them
//! converge on [`Variant`]. The persisted representation is never rewritten
//! in place; it is normalized on read and re-encoded on write.

mod field;
mod normalize;
mod panel;
mod text;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::VariantTextError;

pub use field::{encode_variant_field, parse_variant_field, RawVariantField};
pub use normalize::normalize_variant_entry;
pub use panel::{PanelSize, PanelState, StoredUpload, UnknownPanelSize};
pub use text::{decode_variant_text, encode_variant_text};

/// One size and the prints offered for it.
///
/// `size` is trimmed and non-empty; `prints` holds at least one trimmed,
/// non-empty entry when produced by any decoder in this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub size: String,
    pub prints: Vec<String>,
}

impl Variant {
    #[must_use]
    pub fn new(size: impl Into<String>, prints: Vec<String>) -> Self {
        Self {
            size: size.into(),
            prints,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        json!({ "size": self.size, "prints": self.prints })
    }
}

/// Where a batch of variant data came from.
#[derive(Debug, Clone, Copy)]
pub enum VariantSource<'a> {
    /// The stored product column, in whatever shape it was written.
    Persisted(&'a Value),
    /// The admin free-text form, one `Size: Print 1, Print 2` per line.
    Textarea(&'a str),
    /// The per-size upload panel.
    Panel(&'a PanelState),
}

impl VariantSource<'_> {
    /// Decodes the source into canonical variants.
    ///
    /// # Errors
    ///
    /// Only [`VariantSource::Textarea`] can fail; see [`decode_variant_text`].
    /// Persisted data degrades to an empty list instead of failing.
    pub fn decode(&self) -> Result<Vec<Variant>, VariantTextError> {
        match self {
            VariantSource::Persisted(raw) => Ok(parse_variant_field(raw)),
            VariantSource::Textarea(text) => decode_variant_text(text),
            VariantSource::Panel(panel) => Ok(panel.materialize()),
        }
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` count as unset.
///
/// This is how the historical writers of variant data decided whether an
/// alternative key or column was present.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
