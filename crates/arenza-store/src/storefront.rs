//! In-memory catalog and the admin-gated mutations on it.

use arenza_core::{is_admin, parse_variant_field, ProductCard, ProductDraft, ProductId, Variant};
use tokio::sync::watch;

use crate::client::BackendClient;
use crate::error::StoreError;
use crate::types::{ProductRow, Session, User};

/// A product row with its variant field already parsed.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub row: ProductRow,
    pub variants: Vec<Variant>,
}

impl CatalogProduct {
    #[must_use]
    pub fn from_row(row: ProductRow) -> Self {
        let variants = row.raw_variants().map(parse_variant_field).unwrap_or_default();
        Self { row, variants }
    }

    #[must_use]
    pub fn id(&self) -> &ProductId {
        &self.row.id
    }

    /// Card for this product, showing `requested_size` when given.
    #[must_use]
    pub fn card<'a>(&'a self, requested_size: Option<&'a str>) -> ProductCard<'a> {
        ProductCard::new(
            self.row.name(),
            self.row.price(),
            self.row.description(),
            self.row.image(),
            &self.variants,
            requested_size,
        )
    }
}

/// Storefront state: the product cache plus the signed-in user.
///
/// The cache is only ever replaced wholesale by [`Storefront::refresh`].
pub struct Storefront {
    client: BackendClient,
    admin_email: Option<String>,
    current_user: Option<User>,
    products: Vec<CatalogProduct>,
    sessions: watch::Receiver<Option<Session>>,
}

impl Storefront {
    #[must_use]
    pub fn new(client: BackendClient, admin_email: Option<String>) -> Self {
        let sessions = client.subscribe_session();
        let current_user = sessions.borrow().as_ref().map(|s| s.user.clone());
        Self {
            client,
            admin_email,
            current_user,
            products: Vec::new(),
            sessions,
        }
    }

    #[must_use]
    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Applies the latest session notification. Returns whether the admin
    /// status changed.
    pub fn sync_session(&mut self) -> bool {
        let was_admin = self.is_admin();
        self.current_user = self
            .sessions
            .borrow_and_update()
            .as_ref()
            .map(|s| s.user.clone());
        was_admin != self.is_admin()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        is_admin(
            self.current_user.as_ref().and_then(|u| u.email.as_deref()),
            self.admin_email.as_deref(),
        )
    }

    /// Replaces the cache with the backend's current product list.
    ///
    /// # Errors
    ///
    /// Propagates [`BackendClient::list_products`] errors; the cache is left
    /// as it was.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let rows = self.client.list_products().await?;
        self.products = rows.into_iter().map(CatalogProduct::from_row).collect();
        tracing::debug!(count = self.products.len(), "catalog refreshed");
        Ok(())
    }

    /// # Errors
    ///
    /// - [`StoreError::NotSignedIn`] / [`StoreError::NotAdmin`] before any network call.
    /// - [`StoreError::Validation`] for an invalid draft, also before any network call.
    /// - Backend errors from the insert or the follow-up refresh.
    pub async fn create(&mut self, draft: &ProductDraft) -> Result<(), StoreError> {
        self.require_admin()?;
        let payload = draft.validate()?;
        self.client.insert_product(&payload).await?;
        self.refresh().await
    }

    /// # Errors
    ///
    /// Same as [`Storefront::create`].
    pub async fn update(&mut self, id: &ProductId, draft: &ProductDraft) -> Result<(), StoreError> {
        self.require_admin()?;
        let payload = draft.validate()?;
        self.client.update_product(id, &payload).await?;
        self.refresh().await
    }

    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] / [`StoreError::NotAdmin`] before any
    /// network call, otherwise backend errors.
    pub async fn delete(&mut self, id: &ProductId) -> Result<(), StoreError> {
        self.require_admin()?;
        self.client.delete_product(id).await?;
        self.refresh().await
    }

    fn require_admin(&self) -> Result<(), StoreError> {
        if self.current_user.is_none() {
            return Err(StoreError::NotSignedIn);
        }
        if !self.is_admin() {
            tracing::warn!("admin action refused for non-admin user");
            return Err(StoreError::NotAdmin);
        }
        Ok(())
    }
}
