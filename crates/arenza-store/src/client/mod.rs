//! HTTP client for the hosted backend's row, auth and storage APIs.

mod auth;
mod products;
mod storage;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::types::Session;

pub use storage::object_path;

/// HTTP client for one backend project.
///
/// Holds the session published by sign-in so every later request is
/// authorized as the signed-in user. Requests are never retried.
pub struct BackendClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) anon_key: String,
    pub(super) bucket: String,
    pub(super) session: watch::Sender<Option<Session>>,
}

impl BackendClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidUrl`] when `base_url` is not an `http(s)` URL.
    /// - [`StoreError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        bucket: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let (session, _) = watch::channel(None);
        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.to_owned(),
            bucket: bucket.to_owned(),
            session,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the project key and the bearer token of the current session,
    /// falling back to the anon key when signed out.
    pub(super) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .session
            .borrow()
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.clone());
        request
            .header("apikey", &self.anon_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    pub(super) fn publish_session(&self, session: Option<Session>) {
        // `send` fails without receivers; the value must still be stored.
        self.session.send_replace(session);
    }
}

fn normalize_base_url(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(StoreError::InvalidUrl {
            url: raw.to_owned(),
            reason: "expected an http(s) URL with a host".to_owned(),
        }),
    }
}

/// Maps a non-2xx response to [`StoreError::Backend`].
pub(crate) async fn check_response(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = backend_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    });
    tracing::error!(status = status.as_u16(), %message, "backend request failed");
    Err(StoreError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// Extracts a human-readable message from a backend error body.
pub(crate) fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| match value.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            _ => None,
        })
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, StoreError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| StoreError::Deserialize {
        context: context.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
