//! Error taxonomy shared by the client controllers.

/// Failures surfaced by client operations.
///
/// Validation failures stay inside [`crate::LoginForm`]; everything else is
/// logged where it is first observed and returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Input rejected before any request was sent.
    #[error("{field}: {message}")]
    Validation {
        /// Offending input field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("{message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body or a fallback.
        message: String,
    },
    /// The request never produced a response.
    #[error("transport failure: {message}")]
    Transport {
        /// Underlying transport error text.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Underlying decode error text.
        message: String,
    },
    /// The session provider rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The account exists but the follow-up sign-in failed.
    #[error("account created, sign-in pending")]
    RegisteredSignInPending,
    /// Another call on the same controller is still running.
    #[error("another request is already in progress")]
    Busy,
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode {
                message: error.to_string(),
            }
        } else {
            Self::Transport {
                message: error.to_string(),
            }
        }
    }
}
