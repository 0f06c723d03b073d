//! Document API handlers.
//!
//! ```text
//! GET /api/documents
//! GET /api/documents/{id}
//! PATCH /api/documents/{id} {"name":"Lease.pdf","status":"REJECTED"}
//! DELETE /api/documents/{id}
//! POST /api/documents/{id}/sign {"signatureImg":"signatures/ada.png"}
//! ```
//!
//! Every endpoint requires a session. Documents owned by another user are
//! reported as missing.

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Document, DocumentStatus, DocumentUpdate, DocumentValidationError, DocumentWithSignature,
    Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DocumentSchema, DocumentStatusSchema, DocumentWithSignatureSchema, ErrorSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, parse_document_id};

/// Partial update body for `PATCH /api/documents/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    #[schema(example = "Lease agreement.pdf")]
    pub name: Option<String>,
    #[schema(value_type = Option<DocumentStatusSchema>)]
    pub status: Option<DocumentStatus>,
    #[schema(example = "application/pdf")]
    pub mime_type: Option<String>,
    #[schema(example = 2_097_152)]
    pub size: Option<u64>,
}

impl TryFrom<UpdateDocumentRequest> for DocumentUpdate {
    type Error = Error;

    fn try_from(value: UpdateDocumentRequest) -> Result<Self, Self::Error> {
        let UpdateDocumentRequest {
            name,
            status,
            mime_type,
            size,
        } = value;
        DocumentUpdate::try_new(name.as_deref(), status, mime_type, size)
            .map_err(map_update_error)
    }
}

fn map_update_error(error: DocumentValidationError) -> Error {
    match error {
        DocumentValidationError::EmptyName | DocumentValidationError::NameTooLong { .. } => {
            invalid_field_error(FieldName::new("name"), error.to_string())
        }
        DocumentValidationError::SignedByUpdate => {
            invalid_field_error(FieldName::new("status"), error.to_string())
        }
        other => Error::invalid_request(other.to_string()),
    }
}

/// Signature body for `POST /api/documents/{id}/sign`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignDocumentRequest {
    #[schema(example = "signatures/3fa85f64.png")]
    pub signature_img: String,
}

/// List the caller's documents, newest first.
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "Documents", body = [DocumentSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Document>>> {
    let owner = session.require_user_id()?;
    let documents = state.documents.list_documents(&owner).await?;
    Ok(web::Json(documents))
}

/// Fetch one document with its signature, if any.
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document UUID")),
    responses(
        (status = 200, description = "Document", body = DocumentWithSignatureSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DocumentWithSignature>> {
    let owner = session.require_user_id()?;
    let id = parse_document_id(&path)?;
    let document = state.documents.get_document(&owner, &id).await?;
    Ok(web::Json(document))
}

/// Apply a partial update.
#[utoipa::path(
    patch,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document UUID")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Updated document", body = DocumentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Conflicting change", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[patch("/documents/{id}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateDocumentRequest>,
) -> ApiResult<web::Json<Document>> {
    let owner = session.require_user_id()?;
    let id = parse_document_id(&path)?;
    let update = DocumentUpdate::try_from(payload.into_inner())?;
    let document = state
        .document_commands
        .update_document(&owner, &id, update)
        .await?;
    Ok(web::Json(document))
}

/// Delete a document and its signature.
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document UUID")),
    responses(
        (status = 200, description = "Deleted document", body = DocumentSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/documents/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Document>> {
    let owner = session.require_user_id()?;
    let id = parse_document_id(&path)?;
    let document = state.document_commands.delete_document(&owner, &id).await?;
    Ok(web::Json(document))
}

/// Sign a pending document.
#[utoipa::path(
    post,
    path = "/api/documents/{id}/sign",
    params(("id" = String, Path, description = "Document UUID")),
    request_body = SignDocumentRequest,
    responses(
        (status = 200, description = "Signed document", body = DocumentWithSignatureSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Document is not pending", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "signDocument"
)]
#[post("/documents/{id}/sign")]
pub async fn sign_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SignDocumentRequest>,
) -> ApiResult<web::Json<DocumentWithSignature>> {
    let signer = session.require_user_id()?;
    let id = parse_document_id(&path)?;
    let SignDocumentRequest { signature_img } = payload.into_inner();
    let signed = state
        .document_commands
        .sign_document(&signer, &id, signature_img)
        .await?;
    Ok(web::Json(signed))
}
