//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{FixtureDocumentRepository, FixtureUserRepository};

use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over in-memory repositories, returned with the repositories
/// so tests can seed and inspect them.
pub fn fixture_state(
    documents: FixtureDocumentRepository,
) -> (HttpState, Arc<FixtureUserRepository>, Arc<FixtureDocumentRepository>) {
    let users = Arc::new(FixtureUserRepository::default());
    let documents = Arc::new(documents);
    (
        HttpState::from_repositories(users.clone(), documents.clone()),
        users,
        documents,
    )
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
