//! Driving port for document reads.
//!
//! HTTP handlers call this port to list and fetch documents for the session
//! user without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, DocumentWithSignature, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentQuery: Send + Sync {
    /// Documents owned by `owner`, newest first.
    async fn list_documents(&self, owner: &UserId) -> Result<Vec<Document>, Error>;

    /// One document with its optional signature.
    ///
    /// Documents owned by someone else are reported as not found.
    async fn get_document(
        &self,
        owner: &UserId,
        id: &DocumentId,
    ) -> Result<DocumentWithSignature, Error>;
}
