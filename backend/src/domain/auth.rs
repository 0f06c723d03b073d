//! Authentication primitives such as login credentials and registrations.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, UserValidationError};

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email failed the address shape check.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN_LENGTH`].
    PasswordTooShort { min: usize },
    /// Registration name failed validation.
    InvalidName(UserValidationError),
}

impl LoginValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::InvalidName(_) => "name",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::InvalidName(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

fn parse_email(raw: &str) -> Result<EmailAddress, LoginValidationError> {
    EmailAddress::new(raw).map_err(|err| match err {
        UserValidationError::EmptyEmail => LoginValidationError::EmptyEmail,
        _ => LoginValidationError::InvalidEmail,
    })
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised by [`EmailAddress`].
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use papersign::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = parse_email(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
///
/// ## Invariants
/// - `name` satisfies [`DisplayName`].
/// - `password` holds at least [`PASSWORD_MIN_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw request fields.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let name = DisplayName::new(name).map_err(LoginValidationError::InvalidName)?;
        let email = parse_email(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
