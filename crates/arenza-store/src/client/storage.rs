use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{check_response, BackendClient};
use crate::error::StoreError;

/// Characters left as-is in a storage path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Object path for an uploaded image: `<slug>/<size>/<timestamp>-<file name>`.
#[must_use]
pub fn object_path(slug: &str, size: &str, timestamp_ms: i64, file_name: &str) -> String {
    format!("{slug}/{size}/{timestamp_ms}-{file_name}")
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl BackendClient {
    /// Uploads `bytes` to `path` in the configured bucket without overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend refuses the object
    /// (including when it already exists) or [`StoreError::Http`].
    pub async fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(&format!(
            "storage/v1/object/{}/{}",
            encode_path(&self.bucket),
            encode_path(path)
        ));
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        check_response(self.authorize(request).send().await?).await?;
        tracing::debug!(path, "uploaded object");
        Ok(())
    }

    /// Public URL of an object in the configured bucket. No network call.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        self.endpoint(&format!(
            "storage/v1/object/public/{}/{}",
            encode_path(&self.bucket),
            encode_path(path)
        ))
    }
}
