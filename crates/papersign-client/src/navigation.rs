//! Client routes and the navigation seam.

use std::fmt;

/// Destinations the controllers navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page, `/`.
    Root,
    /// Login page, `/login`.
    Login,
    /// Document list, `/documents`.
    Documents,
    /// One document, `/documents/{id}`.
    Document(String),
    /// Signing page for one document, `/documents/{id}/sign`.
    SignDocument(String),
}

impl Route {
    /// URL path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Documents => "/documents".to_owned(),
            Self::Document(id) => format!("/documents/{id}"),
            Self::SignDocument(id) => format!("/documents/{id}/sign"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Host-provided router.
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn push(&self, route: Route);
}
