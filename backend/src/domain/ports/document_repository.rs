//! Port abstraction for document persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Document, DocumentDraft, DocumentId, DocumentUpdate, DocumentWithSignature, Signature,
    SignatureDraft, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by document repository adapters.
    pub enum DocumentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "document repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "document repository query failed: {message}",
        /// The targeted document does not exist.
        NotFound { id: String } => "document {id} not found",
        /// A database or state constraint rejected the mutation.
        Constraint { message: String } => "document constraint violated: {message}",
    }
}

/// Signature captured by the sign flow, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignature {
    pub document_id: DocumentId,
    pub user_id: UserId,
    pub signature_img: String,
}

/// Storage operations backing document reads and mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fetch one document joined with its optional signature.
    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<DocumentWithSignature>, DocumentRepositoryError>;

    /// List the documents owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId)
    -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// Returns [`DocumentRepositoryError::NotFound`] when no row matches.
    async fn update(
        &self,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> Result<Document, DocumentRepositoryError>;

    /// Hard-delete a document, cascading to its signature.
    async fn delete(&self, id: &DocumentId) -> Result<Document, DocumentRepositoryError>;

    /// Store a signature and mark the document signed in one transaction.
    ///
    /// Only pending documents transition; any other status yields
    /// [`DocumentRepositoryError::Constraint`].
    async fn sign(
        &self,
        signature: &NewSignature,
    ) -> Result<DocumentWithSignature, DocumentRepositoryError>;
}

/// In-memory repository used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureDocumentRepository {
    records: Mutex<Vec<DocumentWithSignature>>,
}

impl FixtureDocumentRepository {
    /// Seed the repository with documents that have no signature yet.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let records = documents
            .into_iter()
            .map(|document| DocumentWithSignature::new(document, None))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<DocumentWithSignature>>, DocumentRepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| DocumentRepositoryError::query("fixture store poisoned"))
    }
}

fn not_found(id: &DocumentId) -> DocumentRepositoryError {
    DocumentRepositoryError::not_found(id.to_string())
}

fn rebuild(
    document: &Document,
    apply: impl FnOnce(&mut DocumentDraft),
) -> Result<Document, DocumentRepositoryError> {
    let mut draft = DocumentDraft {
        id: document.id(),
        name: document.name().as_ref().to_owned(),
        size: document.size(),
        mime_type: document.mime_type().map(str::to_owned),
        file_key: document.file_key().to_owned(),
        status: document.status(),
        owner_id: document.owner_id().clone(),
        created_at: document.created_at(),
        updated_at: Utc::now(),
    };
    apply(&mut draft);
    Document::new(draft).map_err(|err| DocumentRepositoryError::constraint(err.to_string()))
}

#[async_trait]
impl DocumentRepository for FixtureDocumentRepository {
    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<DocumentWithSignature>, DocumentRepositoryError> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .find(|record| record.document().id() == *id)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let records = self.lock()?;
        let mut owned: Vec<Document> = records
            .iter()
            .map(DocumentWithSignature::document)
            .filter(|document| document.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> Result<Document, DocumentRepositoryError> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| record.document().id() == *id)
            .ok_or_else(|| not_found(id))?;
        let updated = rebuild(record.document(), |draft| {
            if let Some(name) = update.name() {
                draft.name = name.as_ref().to_owned();
            }
            if let Some(status) = update.status() {
                draft.status = status;
            }
            if let Some(mime_type) = update.mime_type() {
                draft.mime_type = Some(mime_type.to_owned());
            }
            if let Some(size) = update.size() {
                draft.size = Some(size);
            }
        })?;
        let signature = record.signature().cloned();
        *record = DocumentWithSignature::new(updated.clone(), signature);
        Ok(updated)
    }

    async fn delete(&self, id: &DocumentId) -> Result<Document, DocumentRepositoryError> {
        let mut records = self.lock()?;
        let index = records
            .iter()
            .position(|record| record.document().id() == *id)
            .ok_or_else(|| not_found(id))?;
        let (document, _) = records.remove(index).into_parts();
        Ok(document)
    }

    async fn sign(
        &self,
        signature: &NewSignature,
    ) -> Result<DocumentWithSignature, DocumentRepositoryError> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| record.document().id() == signature.document_id)
            .ok_or_else(|| not_found(&signature.document_id))?;
        if !record.document().status().can_be_signed() {
            return Err(DocumentRepositoryError::constraint(
                "document is not pending",
            ));
        }

        let now = Utc::now();
        let stored_signature = Signature::new(SignatureDraft {
            id: Uuid::new_v4(),
            document_id: signature.document_id,
            user_id: signature.user_id.clone(),
            signature_img: signature.signature_img.clone(),
            signed_at: Some(now),
            created_at: now,
        })
        .map_err(|err| DocumentRepositoryError::constraint(err.to_string()))?;
        let document = rebuild(record.document(), |draft| {
            draft.status = crate::domain::DocumentStatus::Signed;
        })?;
        *record = DocumentWithSignature::new(document, Some(stored_signature));
        Ok(record.clone())
    }
}
