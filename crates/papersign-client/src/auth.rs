//! Login, registration and logout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use crate::busy::InFlight;
use crate::http::remote_error;
use crate::messages::auth as msg;
use crate::{
    ApiClient, ClientError, Credentials, Navigator, Notification, Notifier, Route,
    SessionProvider, SignInOutcome, ToastStyle,
};

/// Whether an [`AuthService`] call is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No call in flight.
    Idle,
    /// A login, registration or logout is running.
    Submitting,
}

/// Registration form contents.
#[derive(Debug, Clone)]
pub struct RegisterData {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Drives the account flows and reports through the host seams.
///
/// Calls are not re-entrant: while one is running every other call fails
/// with [`ClientError::Busy`].
pub struct AuthService {
    api: ApiClient,
    provider: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl AuthService {
    /// Wire the service to its collaborators.
    #[must_use]
    pub fn new(
        api: ApiClient,
        provider: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            provider,
            navigator,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.is_loading() {
            AuthState::Submitting
        } else {
            AuthState::Idle
        }
    }

    /// Sign in and go to the document list.
    ///
    /// # Errors
    /// [`ClientError::InvalidCredentials`] when the provider rejects the
    /// credentials and [`ClientError::Busy`] when another call is running.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        match self.provider.sign_in(credentials).await {
            SignInOutcome::Success => {
                info!("login succeeded");
                self.toast_success(msg::LOGIN_SUCCESS);
                self.navigator.push(Route::Documents);
                Ok(())
            }
            SignInOutcome::Error(reason) => {
                warn!(%reason, "login rejected");
                self.toast_error(msg::LOGIN_ERROR);
                Err(ClientError::InvalidCredentials)
            }
        }
    }

    /// Create an account, then sign in with it.
    ///
    /// # Errors
    /// - [`ClientError::Validation`] when the passwords differ.
    /// - [`ClientError::Remote`] when the backend refuses the account.
    /// - [`ClientError::RegisteredSignInPending`] when the account exists but
    ///   the follow-up sign-in failed.
    /// - [`ClientError::Transport`] or [`ClientError::Busy`] otherwise.
    pub async fn register(&self, data: &RegisterData) -> Result<(), ClientError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        if data.password != data.confirm_password {
            self.toast_error(msg::PASSWORD_MISMATCH);
            return Err(ClientError::Validation {
                field: "confirm_password",
                message: msg::PASSWORD_MISMATCH.to_owned(),
            });
        }

        if let Err(error) = self.create_account(data).await {
            warn!(%error, "registration failed");
            let message = match &error {
                ClientError::Remote { message, .. } => message.as_str(),
                _ => msg::REGISTER_ERROR,
            };
            self.toast_error(message);
            return Err(error);
        }

        let credentials = Credentials::new(data.email.as_str(), data.password.as_str());
        if let SignInOutcome::Error(reason) = self.provider.sign_in(&credentials).await {
            warn!(%reason, "sign-in after registration failed");
            self.toast_error(msg::REGISTER_SIGN_IN_PENDING);
            self.navigator.push(Route::Login);
            return Err(ClientError::RegisteredSignInPending);
        }

        info!("account registered");
        self.toast_success(msg::REGISTER_SUCCESS);
        self.navigator.push(Route::Documents);
        Ok(())
    }

    async fn create_account(&self, data: &RegisterData) -> Result<(), ClientError> {
        let body = RegisterBody {
            name: &data.name,
            email: &data.email,
            password: &data.password,
        };
        let response = self.api.post_json("/api/register", &body).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::METHOD_NOT_ALLOWED {
            Err(ClientError::Remote {
                status: status.as_u16(),
                message: msg::REGISTER_UNAVAILABLE.to_owned(),
            })
        } else {
            Err(remote_error(response, msg::REGISTER_ERROR).await)
        }
    }

    /// End the session. Always navigates to the login page.
    ///
    /// # Errors
    /// Whatever the provider reports, or [`ClientError::Busy`].
    pub async fn logout(&self) -> Result<(), ClientError> {
        let _guard = InFlight::acquire(&self.in_flight)?;
        let result = self.provider.sign_out(Route::Login).await;
        match &result {
            Ok(_) => self.toast_success(msg::LOGOUT_SUCCESS),
            Err(error) => {
                warn!(%error, "logout failed");
                self.toast_error(msg::LOGOUT_ERROR);
            }
        }
        self.navigator.push(Route::Login);
        result.map(|_| ())
    }

    fn toast_success(&self, message: &str) {
        self.notifier
            .notify(Notification::success(message, ToastStyle::standard()));
    }

    fn toast_error(&self, message: &str) {
        self.notifier
            .notify(Notification::error(message, ToastStyle::standard()));
    }
}
