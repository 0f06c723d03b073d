//! Cookie session lifecycle for signed-in users.
//!
//! The cookie stores only the user id. Signing in renews the session so a
//! cookie issued before login never carries the new identity; signing out
//! purges it and expires the cookie.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, info, warn};

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
const LOGIN_REQUIRED_MESSAGE: &str = "login required";

/// Request extractor over the signed session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `user_id`, discarding earlier state.
    pub fn sign_in(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0.insert(USER_ID_KEY, user_id.as_ref()).map_err(|error| {
            warn!(user_id = %user_id, %error, "session cookie could not be written");
            Error::internal(format!("failed to persist session: {error}"))
        })?;
        info!(user_id = %user_id, "session established");
        Ok(())
    }

    /// Signed-in user, if any. A cookie holding a malformed id is treated as
    /// signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| {
            UserId::new(raw)
                .inspect_err(|error| warn!(%error, "ignoring malformed user id in session"))
                .ok()
        }))
    }

    /// End the session. Safe to call without one.
    pub fn sign_out(&self) {
        match self.user_id() {
            Ok(Some(user_id)) => info!(user_id = %user_id, "session ended"),
            _ => debug!("sign-out without an active session"),
        }
        self.0.purge();
    }

    /// Signed-in user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED_MESSAGE))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
