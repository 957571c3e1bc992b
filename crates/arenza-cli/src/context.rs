//! Backend connection and sign-in shared by the command handlers.

use std::time::Duration;

use anyhow::Context as _;
use arenza_core::{AppConfig, ClientConfig};
use arenza_store::{fetch_client_config, BackendClient, Storefront};

/// Email and password from the global flags.
#[derive(Debug, Default)]
pub(crate) struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    fn require(&self) -> anyhow::Result<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Ok((email.trim(), password))
            }
            _ => anyhow::bail!("--email and --password (or ARENZA_EMAIL / ARENZA_PASSWORD) are required"),
        }
    }
}

/// Resolves the client config and builds the storefront.
///
/// With a site URL the relay is asked first; otherwise the backend
/// credentials come from the environment.
pub(crate) async fn connect(config: &AppConfig, site_url: Option<&str>) -> anyhow::Result<Storefront> {
    let client_config = resolve_client_config(config, site_url).await?;
    let client = BackendClient::new(
        &client_config.url,
        &client_config.anon_key,
        &config.storage_bucket,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build backend client")?;
    tracing::debug!(url = %client_config.url, "connected to backend");
    Ok(Storefront::new(client, client_config.admin_email))
}

async fn resolve_client_config(
    config: &AppConfig,
    site_url: Option<&str>,
) -> anyhow::Result<ClientConfig> {
    if let Some(site_url) = site_url.map(str::trim).filter(|s| !s.is_empty()) {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        return Ok(fetch_client_config(&http, site_url).await?);
    }
    ClientConfig::from_app_config(config).ok_or_else(|| {
        anyhow::anyhow!("backend config missing: set SUPABASE_URL and SUPABASE_ANON_KEY or pass --site-url")
    })
}

/// Signs in and refuses to continue unless the user is the administrator.
pub(crate) async fn sign_in_admin(
    store: &mut Storefront,
    credentials: &Credentials,
) -> anyhow::Result<()> {
    let (email, password) = credentials.require()?;
    store
        .client()
        .sign_in(email, password)
        .await
        .context("sign-in failed")?;
    store.sync_session();
    if !store.is_admin() {
        anyhow::bail!("{email} is not the store administrator");
    }
    Ok(())
}

pub(crate) async fn sign_up(store: &Storefront, credentials: &Credentials) -> anyhow::Result<()> {
    let (email, password) = credentials.require()?;
    match store.client().sign_up(email, password).await? {
        Some(_) => println!("account created for {email}; signed in"),
        None => println!("account created for {email}; check your inbox to confirm it"),
    }
    Ok(())
}
