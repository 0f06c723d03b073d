//! Driving port for document mutations.

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, DocumentUpdate, DocumentWithSignature, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCommand: Send + Sync {
    /// Apply a partial update and return the stored record.
    async fn update_document(
        &self,
        owner: &UserId,
        id: &DocumentId,
        update: DocumentUpdate,
    ) -> Result<Document, Error>;

    /// Hard-delete a document and return what was removed.
    async fn delete_document(&self, owner: &UserId, id: &DocumentId) -> Result<Document, Error>;

    /// Record `signer`'s signature and mark the document signed.
    async fn sign_document(
        &self,
        signer: &UserId,
        id: &DocumentId,
        signature_img: String,
    ) -> Result<DocumentWithSignature, Error>;
}
