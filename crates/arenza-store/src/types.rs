//! Wire types for the hosted backend's row, auth and relay responses.
//!
//! ### Product rows
//! The `products` table has been written by several generations of the admin
//! tooling. `price` arrives as a JSON number from `numeric` columns but older
//! rows hold strings; it is kept raw and parsed on access. Variant data may
//! live in `size_variants` (current), `variants` or `variant_options`; the
//! first set column wins.

use std::str::FromStr;

use arenza_core::{is_truthy, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// A row of the `products` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size_variants: Option<Value>,
    #[serde(default)]
    pub variants: Option<Value>,
    #[serde(default)]
    pub variant_options: Option<Value>,
}

impl ProductRow {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }

    /// The stored price, or `None` when missing or unreadable.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match &self.price {
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }

    /// The raw variant column in use for this row.
    #[must_use]
    pub fn raw_variants(&self) -> Option<&Value> {
        [&self.size_variants, &self.variants, &self.variant_options]
            .into_iter()
            .flatten()
            .find(|value| is_truthy(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session returned by password sign-in.
#[derive(Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Relay body before validation; any field may be missing or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelayBody {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> ProductRow {
        serde_json::from_value(value).expect("valid product row")
    }

    #[test]
    fn numeric_and_text_prices_parse() {
        assert_eq!(
            row(json!({ "id": 1, "price": 189.9 })).price(),
            Some(Decimal::new(1899, 1))
        );
        assert_eq!(
            row(json!({ "id": 1, "price": " 59.90 " })).price(),
            Some(Decimal::new(5990, 2))
        );
    }

    #[test]
    fn missing_or_garbage_price_is_none() {
        assert_eq!(row(json!({ "id": 1 })).price(), None);
        assert_eq!(row(json!({ "id": 1, "price": "caro" })).price(), None);
        assert_eq!(row(json!({ "id": 1, "price": null })).price(), None);
    }

    #[test]
    fn null_text_columns_read_as_empty() {
        let r = row(json!({ "id": 1, "name": null, "description": null }));
        assert_eq!(r.name(), "");
        assert_eq!(r.description(), "");
        assert_eq!(r.image(), "");
    }

    #[test]
    fn raw_variants_prefers_current_column() {
        let r = row(json!({
            "id": 1,
            "size_variants": "[]",
            "variants": [{ "size": "P", "prints": ["Floral"] }]
        }));
        assert_eq!(r.raw_variants(), Some(&json!("[]")));
    }

    #[test]
    fn raw_variants_skips_empty_columns() {
        let r = row(json!({
            "id": 1,
            "size_variants": null,
            "variants": "",
            "variant_options": { "P": "Floral" }
        }));
        assert_eq!(r.raw_variants(), Some(&json!({ "P": "Floral" })));
    }

    #[test]
    fn raw_variants_none_when_all_unset() {
        assert_eq!(row(json!({ "id": 1 })).raw_variants(), None);
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session: Session = serde_json::from_value(json!({
            "access_token": "secret-token",
            "refresh_token": "secret-refresh",
            "user": { "id": "u1", "email": "admin@arenza.com.br" }
        }))
        .unwrap();
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret"), "token leaked: {rendered}");
    }
}
