//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// A user together with the stored password hash.
///
/// Only the persistence adapter and the authentication services see this
/// type; handlers work with [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Returns [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken; no row is written in that case.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by its normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory user store used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl FixtureUserRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::query("fixture store poisoned"))
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        if accounts
            .iter()
            .any(|existing| existing.user.email() == account.user.email())
        {
            return Err(UserPersistenceError::duplicate_email(
                account.user.email().as_ref(),
            ));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }
}
