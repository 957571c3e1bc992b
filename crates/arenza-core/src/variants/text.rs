//! The line-oriented admin text format: `Size: Print 1, Print 2`.
//!
//! Each line is split on its first colon only, so a size can never contain a
//! colon while a print may (image URLs survive a round trip). Commas always
//! separate prints; there is no escaping.

use super::Variant;
use crate::error::VariantTextError;

/// Renders variants one per line as `Size: Print 1, Print 2`.
#[must_use]
pub fn encode_variant_text(variants: &[Variant]) -> String {
    variants
        .iter()
        .map(|variant| format!("{}: {}", variant.size, variant.prints.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses admin text into variants. Blank lines are ignored.
///
/// # Errors
///
/// - [`VariantTextError::MissingDelimiter`] when a line has no colon.
/// - [`VariantTextError::MissingSize`] when nothing precedes the colon.
/// - [`VariantTextError::MissingPrints`] when no print follows the colon.
pub fn decode_variant_text(text: &str) -> Result<Vec<Variant>, VariantTextError> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(decode_line)
        .collect()
}

fn decode_line(line: &str) -> Result<Variant, VariantTextError> {
    let Some((size_part, prints_part)) = line.split_once(':') else {
        return Err(VariantTextError::MissingDelimiter {
            line: line.to_owned(),
        });
    };

    let size = size_part.trim();
    if size.is_empty() {
        return Err(VariantTextError::MissingSize {
            line: line.to_owned(),
        });
    }

    let prints: Vec<String> = prints_part
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();
    if prints.is_empty() {
        return Err(VariantTextError::MissingPrints {
            size: size.to_owned(),
        });
    }

    Ok(Variant {
        size: size.to_owned(),
        prints,
    })
}
