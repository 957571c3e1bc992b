use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Generate a URL- and path-safe slug from a product name.
///
/// Lower-cases, decomposes to NFD and drops combining marks (so any accented
/// Latin letter folds to its base letter), then collapses every run of other
/// characters into a single `-`. Leading and trailing separators are dropped,
/// so a name with no usable characters yields an empty string.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
