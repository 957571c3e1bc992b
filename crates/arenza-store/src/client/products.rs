use arenza_core::{ProductId, ProductPayload};

use super::{check_response, decode_json, BackendClient};
use crate::error::StoreError;
use crate::types::ProductRow;

const PRODUCTS_PATH: &str = "rest/v1/products";

impl BackendClient {
    /// Fetches every product row in ascending id order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Backend`] on a non-2xx status.
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::Deserialize`] when the body is not a list of rows.
    pub async fn list_products(&self) -> Result<Vec<ProductRow>, StoreError> {
        let request = self
            .client
            .get(self.endpoint(PRODUCTS_PATH))
            .query(&[("select", "*"), ("order", "id.asc")]);
        let response = check_response(self.authorize(request).send().await?).await?;
        let rows: Vec<ProductRow> = decode_json(response, "product list").await?;
        tracing::debug!(count = rows.len(), "fetched product rows");
        Ok(rows)
    }

    /// Inserts one product row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] or [`StoreError::Http`] when the
    /// backend rejects or never receives the insert.
    pub async fn insert_product(&self, payload: &ProductPayload) -> Result<(), StoreError> {
        let request = self
            .client
            .post(self.endpoint(PRODUCTS_PATH))
            .header("Prefer", "return=minimal")
            .json(&[payload]);
        check_response(self.authorize(request).send().await?).await?;
        tracing::info!(name = %payload.name, "inserted product");
        Ok(())
    }

    /// Overwrites the row with `id`. Concurrent edits are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] or [`StoreError::Http`].
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.endpoint(PRODUCTS_PATH))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(payload);
        check_response(self.authorize(request).send().await?).await?;
        tracing::info!(%id, "updated product");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] or [`StoreError::Http`].
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.endpoint(PRODUCTS_PATH))
            .query(&[("id", format!("eq.{id}"))]);
        check_response(self.authorize(request).send().await?).await?;
        tracing::info!(%id, "deleted product");
        Ok(())
    }
}
