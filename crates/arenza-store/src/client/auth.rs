use serde_json::{json, Value};
use tokio::sync::watch;

use super::{check_response, decode_json, BackendClient};
use crate::error::StoreError;
use crate::types::{Session, User};

impl BackendClient {
    /// Registers a new account.
    ///
    /// Returns the session when the project signs new users in immediately,
    /// `None` when it requires email confirmation first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend rejects the sign-up,
    /// [`StoreError::Http`] on network failure, or [`StoreError::Deserialize`]
    /// for an unreadable body.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, StoreError> {
        let request = self
            .client
            .post(self.endpoint("auth/v1/signup"))
            .json(&json!({ "email": email, "password": password }));
        let response = check_response(self.authorize(request).send().await?).await?;
        let body: Value = decode_json(response, "sign-up response").await?;

        if body.get("access_token").is_none() {
            tracing::info!(email, "account created; confirmation pending");
            return Ok(None);
        }
        let session: Session =
            serde_json::from_value(body).map_err(|source| StoreError::Deserialize {
                context: "sign-up session".to_owned(),
                source,
            })?;
        tracing::info!(email, "account created and signed in");
        self.publish_session(Some(session.clone()));
        Ok(Some(session))
    }

    /// Signs in with email and password and publishes the new session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] for rejected credentials,
    /// [`StoreError::Http`] on network failure, or [`StoreError::Deserialize`]
    /// for an unreadable body.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let request = self
            .client
            .post(self.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = check_response(self.authorize(request).send().await?).await?;
        let session: Session = decode_json(response, "sign-in session").await?;
        tracing::info!(email, "signed in");
        self.publish_session(Some(session.clone()));
        Ok(session)
    }

    /// Ends the current session. The local session is cleared even when the
    /// backend call fails.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] or [`StoreError::Http`] from the
    /// logout call.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        if self.session.borrow().is_none() {
            return Ok(());
        }
        let request = self.authorize(self.client.post(self.endpoint("auth/v1/logout")));
        let result = match request.send().await {
            Ok(response) => check_response(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        self.publish_session(None);
        tracing::info!("signed out");
        result
    }

    /// Receives every session change: `Some` after sign-in, `None` after sign-out.
    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().as_ref().map(|s| s.user.clone())
    }
}
