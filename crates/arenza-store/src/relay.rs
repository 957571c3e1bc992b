//! Client for the config relay that hands out the backend credentials.

use arenza_core::ClientConfig;
use reqwest::Client;

use crate::error::StoreError;
use crate::types::RelayBody;

/// Relay paths in the order they are tried.
pub const CONFIG_ENDPOINTS: [&str; 2] = ["/api/get-config", "/.netlify/functions/get-config"];

/// Resolves the backend credentials from the relay hosted at `site_url`.
///
/// Each endpoint is tried in order; the first 2xx JSON body carrying a
/// non-empty `url` and `anonKey` wins. Transport errors, bad statuses and
/// malformed bodies fall through to the next endpoint.
///
/// # Errors
///
/// Returns [`StoreError::ConfigUnavailable`] when no endpoint yields usable
/// credentials.
pub async fn fetch_client_config(http: &Client, site_url: &str) -> Result<ClientConfig, StoreError> {
    let base = site_url.trim().trim_end_matches('/');
    for endpoint in CONFIG_ENDPOINTS {
        let url = format!("{base}{endpoint}");
        match try_endpoint(http, &url).await {
            Some(config) => {
                tracing::debug!(%url, "resolved client config");
                return Ok(config);
            }
            None => tracing::debug!(%url, "config endpoint unusable; trying next"),
        }
    }
    Err(StoreError::ConfigUnavailable {
        site_url: base.to_owned(),
    })
}

async fn try_endpoint(http: &Client, url: &str) -> Option<ClientConfig> {
    let response = http.get(url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let body: RelayBody = response.json().await.ok()?;
    let non_empty = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
    Some(ClientConfig {
        url: non_empty(body.url)?,
        anon_key: non_empty(body.anon_key)?,
        admin_email: non_empty(body.admin_email),
    })
}
