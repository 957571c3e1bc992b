use arenza_core::ProductValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no config endpoint under {site_url} returned usable credentials")]
    ConfigUnavailable { site_url: String },

    #[error("sign in before performing this action")]
    NotSignedIn,

    #[error("the signed-in user is not the store administrator")]
    NotAdmin,

    #[error("enter the product name before uploading images")]
    MissingProductName,

    #[error(transparent)]
    Validation(#[from] ProductValidationError),
}
