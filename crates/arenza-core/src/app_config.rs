use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Base URL and anonymous key for the hosted backend.
///
/// Only constructed when both values are present; a half-configured pair is
/// treated as absent.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendCredentials {
    pub url: String,
    pub anon_key: String,
}

impl std::fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("url", &self.url)
            .field("anon_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub backend: Option<BackendCredentials>,
    pub admin_email: Option<String>,
    pub site_url: Option<String>,
    pub storage_bucket: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

/// Configuration handed to storefront clients by the config relay.
///
/// Wire shape: `{"url": ..., "anonKey": ..., "adminEmail": ... | null}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub url: String,
    pub anon_key: String,
    pub admin_email: Option<String>,
}

impl ClientConfig {
    /// Builds the relay payload, or `None` when backend credentials are absent.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        config.backend.as_ref().map(|backend| Self {
            url: backend.url.clone(),
            anon_key: backend.anon_key.clone(),
            admin_email: config.admin_email.clone(),
        })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("anon_key", &"[redacted]")
            .field("admin_email", &self.admin_email)
            .finish()
    }
}
