//! Documents awaiting signature and the signatures recorded against them.
//!
//! Purpose: model the records behind the document list and signing flow.
//! Every type keeps its fields private; construct them through the validating
//! constructors and read them back through accessors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

mod status;

pub use status::{DocumentStatus, ParseDocumentStatusError};

/// Longest accepted document name, counted in characters.
pub const DOCUMENT_NAME_MAX: usize = 255;

/// Validation errors returned by the document constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentValidationError {
    #[error("document id must be a valid UUID")]
    InvalidId,
    #[error("document name must not be empty")]
    EmptyName,
    #[error("document name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("file key must not be empty")]
    EmptyFileKey,
    #[error("signature image must not be empty")]
    EmptySignatureImage,
    #[error("document update must change at least one field")]
    EmptyUpdate,
    #[error("documents become SIGNED only through the sign action")]
    SignedByUpdate,
}

/// Stable document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Parse an identifier from its textual UUID form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| DocumentValidationError::InvalidId)
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Document title shown in listings.
///
/// ## Invariants
/// - Trimmed, non-empty and at most [`DOCUMENT_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DocumentValidationError::EmptyName);
        }
        if trimmed.chars().count() > DOCUMENT_NAME_MAX {
            return Err(DocumentValidationError::NameTooLong {
                max: DOCUMENT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DocumentName> for String {
    fn from(value: DocumentName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DocumentName {
    type Error = DocumentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`Document::new`].
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    pub id: DocumentId,
    pub name: String,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub file_key: String,
    pub status: DocumentStatus,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An uploaded document and its signing status.
///
/// Serialises as camelCase JSON; `status` uses the upper-case wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    id: DocumentId,
    name: DocumentName,
    size: Option<u64>,
    mime_type: Option<String>,
    file_key: String,
    status: DocumentStatus,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Validate a draft into a [`Document`].
    pub fn new(draft: DocumentDraft) -> Result<Self, DocumentValidationError> {
        let name = DocumentName::new(&draft.name)?;
        if draft.file_key.trim().is_empty() {
            return Err(DocumentValidationError::EmptyFileKey);
        }
        let mime_type = draft.mime_type.filter(|mime| !mime.trim().is_empty());

        Ok(Self {
            id: draft.id,
            name,
            size: draft.size,
            mime_type,
            file_key: draft.file_key,
            status: draft.status,
            owner_id: draft.owner_id,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &DocumentName {
        &self.name
    }

    /// Size in bytes, when the upload reported one.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Storage key of the uploaded blob.
    pub fn file_key(&self) -> &str {
        self.file_key.as_str()
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// True when `user` owns the document.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Input payload for [`Signature::new`].
#[derive(Debug, Clone)]
pub struct SignatureDraft {
    pub id: Uuid,
    pub document_id: DocumentId,
    pub user_id: UserId,
    pub signature_img: String,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Signature captured for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    id: Uuid,
    document_id: DocumentId,
    user_id: UserId,
    signature_img: String,
    signed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Signature {
    pub fn new(draft: SignatureDraft) -> Result<Self, DocumentValidationError> {
        if draft.signature_img.trim().is_empty() {
            return Err(DocumentValidationError::EmptySignatureImage);
        }
        Ok(Self {
            id: draft.id,
            document_id: draft.document_id,
            user_id: draft.user_id,
            signature_img: draft.signature_img,
            signed_at: draft.signed_at,
            created_at: draft.created_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// The signer.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Reference to the captured signature image.
    pub fn signature_img(&self) -> &str {
        self.signature_img.as_str()
    }

    pub fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.signed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A document together with its optional signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentWithSignature {
    #[serde(flatten)]
    document: Document,
    signature: Option<Signature>,
}

impl DocumentWithSignature {
    pub fn new(document: Document, signature: Option<Signature>) -> Self {
        Self {
            document,
            signature,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn into_parts(self) -> (Document, Option<Signature>) {
        (self.document, self.signature)
    }
}

/// Partial update applied to a stored document.
///
/// ## Invariants
/// - At least one field is set.
/// - The status is never set to `Signed`; signing records a signature.
/// - The identifier is not part of the update, so ids never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentUpdate {
    name: Option<DocumentName>,
    status: Option<DocumentStatus>,
    mime_type: Option<String>,
    size: Option<u64>,
}

impl DocumentUpdate {
    /// Build an update from optional raw fields.
    pub fn try_new(
        name: Option<&str>,
        status: Option<DocumentStatus>,
        mime_type: Option<String>,
        size: Option<u64>,
    ) -> Result<Self, DocumentValidationError> {
        if status == Some(DocumentStatus::Signed) {
            return Err(DocumentValidationError::SignedByUpdate);
        }
        let name = name.map(DocumentName::new).transpose()?;
        let update = Self {
            name,
            status,
            mime_type,
            size,
        };
        if update.is_empty() {
            return Err(DocumentValidationError::EmptyUpdate);
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.mime_type.is_none()
            && self.size.is_none()
    }

    pub fn name(&self) -> Option<&DocumentName> {
        self.name.as_ref()
    }

    pub fn status(&self) -> Option<DocumentStatus> {
        self.status
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }
}
