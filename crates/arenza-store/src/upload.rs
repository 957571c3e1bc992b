//! Sequential image uploads for the per-size panel.

use arenza_core::{slugify, PanelSize, PanelState, StoredUpload};

use crate::client::{object_path, BackendClient};
use crate::error::StoreError;

const FALLBACK_CONTENT_TYPE: &str = "image/*";

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: StoreError,
}

/// Outcome of one batch: files that were stored and files that were not.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub uploaded: Vec<StoredUpload>,
    pub failed: Vec<UploadFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Uploads `files` one after another under `size` and records each stored
/// object in `panel`.
///
/// A failing file is reported and skipped; the rest of the batch continues.
///
/// # Errors
///
/// Returns [`StoreError::MissingProductName`] before any upload when the
/// product name produces an empty slug.
pub async fn upload_batch(
    client: &BackendClient,
    panel: &mut PanelState,
    product_name: &str,
    size: PanelSize,
    files: Vec<UploadFile>,
) -> Result<BatchReport, StoreError> {
    let slug = slugify(product_name);
    if slug.is_empty() {
        return Err(StoreError::MissingProductName);
    }

    let mut report = BatchReport::default();
    if files.is_empty() {
        return Ok(report);
    }
    tracing::info!(count = files.len(), %size, product = %slug, "uploading images");

    for file in files {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let path = object_path(&slug, size.as_str(), timestamp_ms, &file.name);
        let content_type = file
            .content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned();

        match client.upload_object(&path, file.bytes, &content_type).await {
            Ok(()) => {
                let url = client.public_url(&path);
                let upload = StoredUpload::new(file.name, path, url);
                panel.record_upload(size, upload.clone());
                report.uploaded.push(upload);
            }
            Err(error) => {
                tracing::warn!(file = %file.name, error = %error, "image upload failed");
                report.failed.push(UploadFailure {
                    file_name: file.name,
                    error,
                });
            }
        }
    }

    Ok(report)
}
