pub mod app_config;
pub mod config;
pub mod error;
pub mod presentation;
pub mod products;
pub mod slug;
pub mod variants;

pub use app_config::{AppConfig, BackendCredentials, ClientConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ProductValidationError, VariantTextError};
pub use presentation::{format_price_brl, is_url_like, print_display, PrintDisplay, ProductCard};
pub use products::{is_admin, ProductDraft, ProductId, ProductPayload};
pub use slug::slugify;
pub use variants::{
    decode_variant_text, encode_variant_field, encode_variant_text, is_truthy,
    normalize_variant_entry, parse_variant_field, PanelSize, PanelState, RawVariantField,
    StoredUpload, UnknownPanelSize, Variant, VariantSource,
};
