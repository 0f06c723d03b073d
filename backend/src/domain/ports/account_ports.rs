//! Driving ports for account sign-up and password login.
//!
//! Both answer with domain [`Error`]s whose codes the HTTP layer maps:
//! `Conflict` for a taken email, `Unauthorized` for any credential mismatch,
//! `ServiceUnavailable` when the account store cannot be reached.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account with a freshly hashed password.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and return the account's user id.
    ///
    /// Unknown emails and wrong passwords fail with the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
