use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejections raised while decoding the `Size: Print 1, Print 2` text format.
///
/// Each variant carries the offending line or size verbatim so the message can
/// be shown to the administrator as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantTextError {
    #[error("invalid format on line \"{line}\"; use \"Size: Print 1, Print 2\"")]
    MissingDelimiter { line: String },

    #[error("enter the size before the colon on line \"{line}\"")]
    MissingSize { line: String },

    #[error("add at least one print for size \"{size}\"")]
    MissingPrints { size: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    #[error("product name must be non-empty")]
    EmptyName,

    #[error("invalid price \"{0}\"")]
    InvalidPrice(String),

    #[error("price must be greater than zero")]
    NonPositivePrice,
}
