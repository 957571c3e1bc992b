//! Storefront view decisions: how a size's prints are shown and how a
//! product card is assembled.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::variants::Variant;

/// How the prints of the selected size are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintDisplay<'a> {
    /// Placeholder: nothing to show for this size.
    Unavailable,
    /// Every print rendered as an image.
    Images(&'a [String]),
    /// Every print rendered as a text badge.
    Badges(&'a [String]),
}

/// Decides how to render the prints of `size`.
///
/// The decision is per variant, not per print: one URL-like print switches
/// the whole list to images. Legacy rows hold print names rather than URLs and
/// fall back to badges. When sizes repeat, the first match wins.
#[must_use]
pub fn print_display<'a>(variants: &'a [Variant], size: &str) -> PrintDisplay<'a> {
    let Some(variant) = variants.iter().find(|v| v.size == size) else {
        return PrintDisplay::Unavailable;
    };

    let prints = variant.prints.as_slice();
    if prints.iter().all(|p| p.trim().is_empty()) {
        PrintDisplay::Unavailable
    } else if prints.iter().any(|p| is_url_like(p)) {
        PrintDisplay::Images(prints)
    } else {
        PrintDisplay::Badges(prints)
    }
}

/// `true` when the trimmed value begins with `http://` or `https://`,
/// ignoring ASCII case.
#[must_use]
pub fn is_url_like(value: &str) -> bool {
    let value = value.trim_start().as_bytes();
    [b"http://".as_slice(), b"https://".as_slice()]
        .iter()
        .any(|scheme| {
            value.len() >= scheme.len() && value[..scheme.len()].eq_ignore_ascii_case(scheme)
        })
}

/// Formats a price in Brazilian reais: `R$ 189,90`. Halves round away from zero.
#[must_use]
pub fn format_price_brl(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("R$ {rounded:.2}").replace('.', ",")
}

/// Everything the storefront shows for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard<'a> {
    pub name: &'a str,
    /// `None` when the stored price is missing or unreadable.
    pub price_label: Option<String>,
    pub description: &'a str,
    pub image: &'a str,
    /// Size options in variant order. Empty means no size selector.
    pub sizes: Vec<&'a str>,
    pub selected_size: Option<&'a str>,
    pub prints: Option<PrintDisplay<'a>>,
}

impl<'a> ProductCard<'a> {
    /// Builds a card. The selected size is `requested_size` when given, else
    /// the first variant's size. Products without variants get no selector.
    #[must_use]
    pub fn new(
        name: &'a str,
        price: Option<Decimal>,
        description: &'a str,
        image: &'a str,
        variants: &'a [Variant],
        requested_size: Option<&'a str>,
    ) -> Self {
        let sizes: Vec<&str> = variants.iter().map(|v| v.size.as_str()).collect();
        let selected_size = if sizes.is_empty() {
            None
        } else {
            requested_size.or_else(|| sizes.first().copied())
        };
        let prints = selected_size.map(|size| print_display(variants, size));

        Self {
            name,
            price_label: price.map(format_price_brl),
            description,
            image,
            sizes,
            selected_size,
            prints,
        }
    }
}

#[cfg(test)]
#[path = "presentation_test.rs"]
mod tests;
