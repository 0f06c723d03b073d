//! Document lifecycle status and how each value is shown.

use serde::Deserialize;

/// Lifecycle status as sent by the backend.
///
/// Unknown wire values fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Awaiting signature.
    Pending,
    /// Signed.
    Signed,
    /// Rejected by the signer.
    Rejected,
}

/// Label, icon and colour for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    /// Text label.
    pub label: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Colour token.
    pub color: &'static str,
}

impl DocumentStatus {
    /// Presentation for this status.
    #[must_use]
    pub const fn presentation(self) -> StatusPresentation {
        match self {
            Self::Pending => StatusPresentation {
                label: "Pendente",
                icon: "clock",
                color: "yellow",
            },
            Self::Signed => StatusPresentation {
                label: "Assinado",
                icon: "check-circle",
                color: "green",
            },
            Self::Rejected => StatusPresentation {
                label: "Rejeitado",
                icon: "x-circle",
                color: "red",
            },
        }
    }
}
