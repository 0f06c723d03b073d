//! Client-side controllers for the papersign service.
//!
//! The crate holds no UI. Each controller talks to the backend through
//! [`ApiClient`] and reports to the host through three seams: a
//! [`Navigator`] for route changes, a [`Notifier`] for transient toasts and a
//! [`SessionProvider`] for signing in and out.
//!
//! - [`AuthService`] drives login, registration and logout.
//! - [`DocumentListView`] loads and renders the signed-in user's documents.
//! - [`LoginForm`] validates credentials before signing in.
//! - [`DocumentActions`] handles the per-document sign and delete actions.

mod busy;
pub mod auth;
pub mod documents;
pub mod error;
pub mod form;
pub mod http;
pub mod messages;
pub mod navigation;
pub mod notify;
pub mod session;
#[cfg(test)]
mod test_support;

pub use auth::{AuthService, AuthState, RegisterData};
pub use documents::{
    Confirm, DocumentActions, DocumentListView, DocumentRow, DocumentStatus, ListScreen,
    ListState, RenderedRow, RetryAction, StatusPresentation, format_file_size_in_mb,
};
pub use error::ClientError;
pub use form::{FieldErrors, LoginForm, SubmitOutcome};
pub use http::ApiClient;
pub use navigation::{Navigator, Route};
pub use notify::{Level, Notification, Notifier, ToastPosition, ToastStyle};
pub use session::{Credentials, HttpSessionProvider, SessionProvider, SignInOutcome};
