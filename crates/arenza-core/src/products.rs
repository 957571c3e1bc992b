use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProductValidationError;
use crate::variants::{encode_variant_field, Variant};

/// Opaque product identifier.
///
/// Rows have been keyed by both integers and UUIDs, so the identifier
/// accepts either JSON numbers or strings and is carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Unvalidated admin input for creating or editing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    /// Price exactly as typed.
    pub price: String,
    pub description: String,
    /// Primary image or model photo URL.
    pub image: String,
    pub variants: Vec<Variant>,
}

impl ProductDraft {
    /// Validates the draft into a payload ready for storage.
    ///
    /// # Errors
    ///
    /// - [`ProductValidationError::EmptyName`] when the trimmed name is empty.
    /// - [`ProductValidationError::InvalidPrice`] when the price is not a decimal number.
    /// - [`ProductValidationError::NonPositivePrice`] when the price is zero or negative.
    pub fn validate(&self) -> Result<ProductPayload, ProductValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }

        let raw_price = self.price.trim();
        let price = Decimal::from_str(raw_price)
            .map_err(|_| ProductValidationError::InvalidPrice(raw_price.to_owned()))?;
        if price <= Decimal::ZERO {
            return Err(ProductValidationError::NonPositivePrice);
        }

        Ok(ProductPayload {
            name: name.to_owned(),
            price,
            description: self.description.trim().to_owned(),
            image: self.image.trim().to_owned(),
            size_variants: encode_variant_field(&self.variants),
        })
    }
}

/// Row body sent on insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    /// JSON text of `{size, prints}` records, `null` when there are none.
    pub size_variants: Option<String>,
}

/// Whether the signed-in user is the configured administrator.
#[must_use]
pub fn is_admin(user_email: Option<&str>, admin_email: Option<&str>) -> bool {
    matches!((user_email, admin_email), (Some(user), Some(admin)) if user == admin)
}
