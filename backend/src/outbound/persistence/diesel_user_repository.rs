//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserAccount, UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, User, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(EMAIL_CONSTRAINT) =>
        {
            UserPersistenceError::duplicate_email(email.unwrap_or_default())
        }
        DieselFailure::UniqueViolation { constraint } => UserPersistenceError::query(format!(
            "unique constraint violated: {}",
            constraint.unwrap_or_default()
        )),
        DieselFailure::Constraint(constraint) => {
            UserPersistenceError::query(format!("constraint violated: {constraint}"))
        }
        DieselFailure::NotFound => UserPersistenceError::query("record not found"),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored email failed validation");
        UserPersistenceError::query(format!("invalid stored email: {err}"))
    })?;
    let display_name = DisplayName::new(&row.display_name)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored name: {err}")))?;
    Ok(User::new(UserId::from_uuid(row.id), email, display_name))
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let user = row_to_user(&row)?;
    Ok(UserAccount {
        user,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = account.user.email().as_ref();
        let row = NewUserRow {
            id: *account.user.id().as_uuid(),
            email,
            display_name: account.user.display_name().as_ref(),
            password_hash: account.password_hash.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(email)))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.as_ref().map(row_to_user).transpose()
    }
}
