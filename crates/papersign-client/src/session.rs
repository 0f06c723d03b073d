//! Session seam: sign in and sign out against the backend.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::http::remote_error;
use crate::{ApiClient, ClientError, Route};

/// Email and password pair submitted to the session provider.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Pair `email` with `password`.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a sign-in attempt.
///
/// Success is opaque: the session itself lives in the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// A session was established.
    Success,
    /// The provider reported an error.
    Error(String),
}

/// Establishes and ends authenticated sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Try to sign in with `credentials`.
    async fn sign_in(&self, credentials: &Credentials) -> SignInOutcome;

    /// End the current session. `callback` is where the host goes next.
    ///
    /// # Errors
    /// Returns a [`ClientError`] when the session could not be ended.
    async fn sign_out(&self, callback: Route) -> Result<Route, ClientError>;
}

/// [`SessionProvider`] backed by `/api/auth/login` and `/api/auth/logout`.
#[derive(Clone, Debug)]
pub struct HttpSessionProvider {
    api: ApiClient,
}

impl HttpSessionProvider {
    /// Use `api` (and its cookie jar) for session calls.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn sign_in(&self, credentials: &Credentials) -> SignInOutcome {
        let response = match self.api.post_json("/api/auth/login", credentials).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "sign-in request failed");
                return SignInOutcome::Error(error.to_string());
            }
        };
        if response.status().is_success() {
            debug!("session established");
            SignInOutcome::Success
        } else {
            let error = remote_error(response, "sign-in rejected").await;
            SignInOutcome::Error(error.to_string())
        }
    }

    async fn sign_out(&self, callback: Route) -> Result<Route, ClientError> {
        let response = self
            .api
            .post_json("/api/auth/logout", &serde_json::json!({}))
            .await?;
        if response.status().is_success() {
            Ok(callback)
        } else {
            Err(remote_error(response, "sign-out failed").await)
        }
    }
}
