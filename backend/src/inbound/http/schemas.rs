//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape and are registered under the domain
//! names, so handlers reference them in `#[utoipa::path]` bodies.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with the current resource state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "document not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "0e6b6f5e-4c3a-4b8e-9d2f-1a2b3c4d5e6f")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "email"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada Lovelace")]
    display_name: String,
}

/// OpenAPI schema for [`crate::domain::DocumentStatus`].
#[derive(ToSchema)]
#[schema(as = DocumentStatus)]
pub enum DocumentStatusSchema {
    #[schema(rename = "PENDING")]
    Pending,
    #[schema(rename = "SIGNED")]
    Signed,
    #[schema(rename = "REJECTED")]
    Rejected,
}

/// OpenAPI schema for [`crate::domain::Document`].
#[derive(ToSchema)]
#[schema(as = Document)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSchema {
    #[schema(example = "9b2f4c1e-7a0d-4c55-8d43-1f0a2b3c4d5e")]
    id: String,
    #[schema(example = "Lease agreement.pdf")]
    name: String,
    /// Size in bytes.
    #[schema(example = 2_097_152)]
    size: Option<u64>,
    #[schema(example = "application/pdf")]
    mime_type: Option<String>,
    /// Storage key of the uploaded file.
    #[schema(example = "uploads/9b2f4c1e.pdf")]
    file_key: String,
    status: DocumentStatusSchema,
    owner_id: String,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Signature`].
#[derive(ToSchema)]
#[schema(as = Signature)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SignatureSchema {
    id: String,
    document_id: String,
    /// Signer.
    user_id: String,
    #[schema(example = "signatures/3fa85f64.png")]
    signature_img: String,
    #[schema(format = DateTime)]
    signed_at: Option<String>,
    #[schema(format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::DocumentWithSignature`].
///
/// The document fields sit alongside `signature`.
#[derive(ToSchema)]
#[schema(as = DocumentWithSignature, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentWithSignatureSchema {
    id: String,
    name: String,
    size: Option<u64>,
    mime_type: Option<String>,
    file_key: String,
    status: DocumentStatusSchema,
    owner_id: String,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
    /// Present once the document has been signed.
    signature: Option<SignatureSchema>,
}
