//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, plus the services that implement the driving ports. Types are
//! immutable once built; invariants and serde contracts live in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, EmailAddress, DisplayName: account identity.
//! - Document, DocumentStatus, Signature: documents and their signatures.
//! - DocumentService, AccountService: driving port implementations.

mod account_service;
pub mod auth;
pub mod document;
mod document_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH, Registration};
pub use self::document::{
    DOCUMENT_NAME_MAX, Document, DocumentDraft, DocumentId, DocumentName, DocumentStatus,
    DocumentUpdate, DocumentValidationError, DocumentWithSignature, ParseDocumentStatusError,
    Signature, SignatureDraft,
};
pub use self::document_service::DocumentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use papersign::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
