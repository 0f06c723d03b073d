//! Signing status of a document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a document.
///
/// The wire and storage form is upper case: `PENDING`, `SIGNED`, `REJECTED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Signed,
    Rejected,
}

impl DocumentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Signed, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Signed => "SIGNED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Only pending documents accept a signature.
    pub fn can_be_signed(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or submitted status string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document status: {value}")]
pub struct ParseDocumentStatusError {
    pub value: String,
}

impl FromStr for DocumentStatus {
    type Err = ParseDocumentStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseDocumentStatusError {
                value: value.to_owned(),
            })
    }
}
