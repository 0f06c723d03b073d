//! Document domain service.
//!
//! Implements the document driving ports on top of a [`DocumentRepository`].
//! Ownership is enforced here: a document that belongs to someone else is
//! indistinguishable from a missing one.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{
    DocumentCommand, DocumentQuery, DocumentRepository, DocumentRepositoryError, NewSignature,
};
use crate::domain::{
    Document, DocumentId, DocumentUpdate, DocumentWithSignature, Error, UserId,
};

const NOT_FOUND_MESSAGE: &str = "document not found";

/// Document service implementing [`DocumentQuery`] and [`DocumentCommand`].
#[derive(Clone)]
pub struct DocumentService<R> {
    repository: Arc<R>,
}

impl<R> DocumentService<R> {
    /// Create a new service with the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: DocumentRepositoryError) -> Error {
    match error {
        DocumentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("document repository unavailable: {message}"))
        }
        DocumentRepositoryError::Query { message } => {
            Error::internal(format!("document repository error: {message}"))
        }
        DocumentRepositoryError::NotFound { .. } => Error::not_found(NOT_FOUND_MESSAGE),
        DocumentRepositoryError::Constraint { message } => Error::conflict(message),
    }
}

fn log_failure(operation: &'static str, id: Option<&DocumentId>, cause: &dyn fmt::Display) {
    match id {
        Some(id) => error!(operation, document_id = %id, error = %cause, "document operation failed"),
        None => error!(operation, error = %cause, "document operation failed"),
    }
}

fn fail(operation: &'static str, id: &DocumentId, error: DocumentRepositoryError) -> Error {
    log_failure(operation, Some(id), &error);
    map_repository_error(error)
}

fn not_found(operation: &'static str, id: &DocumentId) -> Error {
    log_failure(operation, Some(id), &NOT_FOUND_MESSAGE);
    Error::not_found(NOT_FOUND_MESSAGE)
}

impl<R> DocumentService<R>
where
    R: DocumentRepository,
{
    async fn fetch_owned(
        &self,
        operation: &'static str,
        owner: &UserId,
        id: &DocumentId,
    ) -> Result<DocumentWithSignature, Error> {
        let record = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| fail(operation, id, err))?;
        match record {
            Some(record) if record.document().is_owned_by(owner) => Ok(record),
            _ => Err(not_found(operation, id)),
        }
    }
}

#[async_trait]
impl<R> DocumentQuery for DocumentService<R>
where
    R: DocumentRepository,
{
    async fn list_documents(&self, owner: &UserId) -> Result<Vec<Document>, Error> {
        self.repository.list_for_owner(owner).await.map_err(|err| {
            log_failure("list_documents", None, &err);
            map_repository_error(err)
        })
    }

    async fn get_document(
        &self,
        owner: &UserId,
        id: &DocumentId,
    ) -> Result<DocumentWithSignature, Error> {
        self.fetch_owned("get_document", owner, id).await
    }
}

#[async_trait]
impl<R> DocumentCommand for DocumentService<R>
where
    R: DocumentRepository,
{
    async fn update_document(
        &self,
        owner: &UserId,
        id: &DocumentId,
        update: DocumentUpdate,
    ) -> Result<Document, Error> {
        const OPERATION: &str = "update_document";
        if update.is_empty() {
            log_failure(OPERATION, Some(id), &"empty update");
            return Err(Error::invalid_request(
                "document update must change at least one field",
            ));
        }
        self.fetch_owned(OPERATION, owner, id).await?;
        self.repository
            .update(id, &update)
            .await
            .map_err(|err| fail(OPERATION, id, err))
    }

    async fn delete_document(&self, owner: &UserId, id: &DocumentId) -> Result<Document, Error> {
        const OPERATION: &str = "delete_document";
        self.fetch_owned(OPERATION, owner, id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|err| fail(OPERATION, id, err))
    }

    async fn sign_document(
        &self,
        signer: &UserId,
        id: &DocumentId,
        signature_img: String,
    ) -> Result<DocumentWithSignature, Error> {
        const OPERATION: &str = "sign_document";
        if signature_img.trim().is_empty() {
            log_failure(OPERATION, Some(id), &"empty signature image");
            return Err(Error::invalid_request("signature image must not be empty"));
        }
        let current = self.fetch_owned(OPERATION, signer, id).await?;
        let status = current.document().status();
        if !status.can_be_signed() {
            log_failure(OPERATION, Some(id), &format!("status is {status}"));
            return Err(Error::conflict(format!(
                "document is {status} and cannot be signed"
            )));
        }

        let signature = NewSignature {
            document_id: *id,
            user_id: signer.clone(),
            signature_img,
        };
        self.repository
            .sign(&signature)
            .await
            .map_err(|err| fail(OPERATION, id, err))
    }
}

#[cfg(test)]
#[path = "document_service_tests.rs"]
mod tests;
