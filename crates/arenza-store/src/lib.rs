pub mod client;
pub mod error;
pub mod relay;
pub mod storefront;
pub mod types;
pub mod upload;

pub use client::{object_path, BackendClient};
pub use error::StoreError;
pub use relay::{fetch_client_config, CONFIG_ENDPOINTS};
pub use storefront::{CatalogProduct, Storefront};
pub use types::{ProductRow, Session, User};
pub use upload::{upload_batch, BatchReport, UploadFailure, UploadFile};
