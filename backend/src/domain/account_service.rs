//! Account sign-up and credential login backed by a [`UserRepository`].
//!
//! Argon2 work runs on the blocking pool. Logins for unknown emails still
//! verify against a throwaway hash.

use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::task;
use tracing::{error, info, warn};

use crate::domain::password::{hash_password, verify_password};
use crate::domain::ports::{
    LoginService, RegistrationService, UserAccount, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

const DUPLICATE_EMAIL_MESSAGE: &str = "an account with this email already exists";
const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";
const DUMMY_PASSWORD: &str = "papersign-timing-equaliser";

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Account service implementing [`RegistrationService`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

fn log_failure(operation: &'static str, cause: &dyn fmt::Display) {
    error!(operation, error = %cause, "account operation failed");
}

fn fail(operation: &'static str, error: UserPersistenceError) -> Error {
    if !matches!(error, UserPersistenceError::DuplicateEmail { .. }) {
        log_failure(operation, &error);
    }
    map_user_persistence_error(error)
}

async fn hash_off_runtime(password: &str) -> Result<String, Error> {
    let password = password.to_owned();
    let hashed = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| {
            log_failure("register", &err);
            Error::internal("password hashing task failed")
        })?;
    hashed.map_err(|err| {
        log_failure("register", &err);
        Error::internal(err.to_string())
    })
}

/// Verify on the blocking pool; `None` checks against the throwaway hash.
async fn verify_off_runtime(password: &str, stored_hash: Option<String>) -> Result<bool, Error> {
    let password = password.to_owned();
    let matched = task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            let dummy = DUMMY_HASH
                .get_or_init(|| hash_password(DUMMY_PASSWORD).unwrap_or_default());
            verify_password(&password, dummy);
            false
        }
    })
    .await
    .map_err(|err| {
        log_failure("authenticate", &err);
        Error::internal("password verification task failed")
    })?;
    Ok(matched)
}

#[async_trait]
impl<R> RegistrationService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(|err| fail("register", err))?;
        if existing.is_some() {
            warn!("registration rejected: email already registered");
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = hash_off_runtime(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.name().clone(),
        );
        self.users
            .insert(&UserAccount {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(|err| fail("register", err))?;

        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| fail("authenticate", err))?;

        let (user_id, stored_hash) = match account {
            Some(account) => (Some(account.user.id().clone()), Some(account.password_hash)),
            None => (None, None),
        };
        let matched = verify_off_runtime(credentials.password(), stored_hash).await?;
        match user_id {
            Some(id) if matched => Ok(id),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)),
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
