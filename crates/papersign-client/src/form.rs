//! Login form: field validation followed by a provider sign-in.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::messages::{auth as msg, validation};
use crate::{
    Credentials, Navigator, Notification, Notifier, Route, SessionProvider, SignInOutcome,
    ToastStyle,
};

const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Inline messages per field. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Message for the email field.
    pub email: Option<&'static str>,
    /// Message for the password field.
    pub password: Option<&'static str>,
}

impl FieldErrors {
    /// True when every field passed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// What [`LoginForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// Signed in and navigated to the landing page.
    SignedIn,
    /// The provider refused the credentials.
    Rejected,
}

/// Values typed into the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
}

impl LoginForm {
    /// Form pre-filled with `email` and `password`.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check both fields.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            email: (!email_regex().is_match(&self.email)).then_some(validation::INVALID_EMAIL),
            password: (self.password.chars().count() < MIN_PASSWORD_CHARS)
                .then_some(validation::PASSWORD_TOO_SHORT),
        }
    }

    /// Validate, then sign in through `provider`.
    ///
    /// Field errors are returned to the caller and never notified.
    pub async fn submit(
        &self,
        provider: &dyn SessionProvider,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }

        let credentials = Credentials::new(self.email.as_str(), self.password.as_str());
        match provider.sign_in(&credentials).await {
            SignInOutcome::Success => {
                navigator.push(Route::Root);
                SubmitOutcome::SignedIn
            }
            SignInOutcome::Error(reason) => {
                warn!(%reason, "login form rejected");
                notifier.notify(Notification::error(
                    msg::LOGIN_ERROR,
                    ToastStyle::login_error(),
                ));
                SubmitOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToastPosition;
    use crate::test_support::{RecordingNavigator, RecordingNotifier, StubSessionProvider};
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", "analytical", None, None)]
    #[case("ada", "analytical", Some(validation::INVALID_EMAIL), None)]
    #[case("ada @example.com", "analytical", Some(validation::INVALID_EMAIL), None)]
    #[case("ada@example", "analytical", Some(validation::INVALID_EMAIL), None)]
    #[case("ada@example.com", "12345", None, Some(validation::PASSWORD_TOO_SHORT))]
    #[case("ada@example.com", "123456", None, None)]
    #[case("", "", Some(validation::INVALID_EMAIL), Some(validation::PASSWORD_TOO_SHORT))]
    fn validates_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] email_error: Option<&'static str>,
        #[case] password_error: Option<&'static str>,
    ) {
        let errors = LoginForm::new(email, password).validate();
        assert_eq!(
            errors,
            FieldErrors {
                email: email_error,
                password: password_error,
            }
        );
    }

    #[tokio::test]
    async fn invalid_form_never_calls_provider() {
        let provider = StubSessionProvider::accepting();
        let navigator = RecordingNavigator::default();
        let notifier = RecordingNotifier::default();

        let outcome = LoginForm::new("nope", "short")
            .submit(&provider, &navigator, &notifier)
            .await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(provider.sign_in_calls(), 0);
        assert!(navigator.routes().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn accepted_credentials_go_to_root() {
        let provider = StubSessionProvider::accepting();
        let navigator = RecordingNavigator::default();
        let notifier = RecordingNotifier::default();

        let outcome = LoginForm::new("ada@example.com", "analytical")
            .submit(&provider, &navigator, &notifier)
            .await;

        assert_eq!(outcome, SubmitOutcome::SignedIn);
        assert_eq!(navigator.routes(), vec![Route::Root]);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn rejection_shows_red_toast() {
        let provider = StubSessionProvider::rejecting("invalid credentials");
        let navigator = RecordingNavigator::default();
        let notifier = RecordingNotifier::default();

        let outcome = LoginForm::new("ada@example.com", "analytical")
            .submit(&provider, &navigator, &notifier)
            .await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(navigator.routes().is_empty());
        let notes = notifier.notifications();
        assert_eq!(notes.len(), 1);
        let note = &notes[0];
        assert_eq!(
            note.message,
            "Erro ao fazer login. Confira seus dados e tente novamente."
        );
        assert_eq!(note.style.duration_ms, 4000);
        assert_eq!(note.style.position, ToastPosition::TopRight);
        assert_eq!(note.style.background, Some("#ef4444"));
        assert_eq!(note.style.color, Some("#fff"));
    }
}
