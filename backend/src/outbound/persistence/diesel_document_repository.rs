//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.
//!
//! Signing runs in one transaction: the status flips from `PENDING` to
//! `SIGNED` only when the row is still pending, and the signature row is
//! written in the same transaction.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError, NewSignature};
use crate::domain::{
    Document, DocumentDraft, DocumentId, DocumentStatus, DocumentUpdate, DocumentWithSignature,
    Signature, SignatureDraft, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{DocumentChangeset, DocumentRow, NewSignatureRow, SignatureRow};
use super::pool::{DbPool, PoolError};
use super::schema::{documents, signatures};

/// Diesel-backed implementation of the [`DocumentRepository`] port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    DocumentRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DocumentRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint } => DocumentRepositoryError::constraint(
            constraint.unwrap_or_else(|| "unique constraint".to_owned()),
        ),
        DieselFailure::Constraint(constraint) => DocumentRepositoryError::constraint(constraint),
        DieselFailure::NotFound => DocumentRepositoryError::query("record not found"),
        DieselFailure::Query(message) => DocumentRepositoryError::query(message),
    }
}

fn size_to_db(size: u64) -> Result<i64, DocumentRepositoryError> {
    i64::try_from(size).map_err(|_| DocumentRepositoryError::constraint("size out of range"))
}

fn row_to_document(row: DocumentRow) -> Result<Document, DocumentRepositoryError> {
    let status = row
        .status
        .parse::<DocumentStatus>()
        .map_err(|err| DocumentRepositoryError::query(err.to_string()))?;
    let size = row
        .size
        .map(u64::try_from)
        .transpose()
        .map_err(|_| DocumentRepositoryError::query("stored size is negative"))?;

    Document::new(DocumentDraft {
        id: DocumentId::from_uuid(row.id),
        name: row.name,
        size,
        mime_type: row.mime_type,
        file_key: row.file_key,
        status,
        owner_id: UserId::from_uuid(row.owner_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| DocumentRepositoryError::query(format!("invalid stored document: {err}")))
}

fn row_to_signature(row: SignatureRow) -> Result<Signature, DocumentRepositoryError> {
    Signature::new(SignatureDraft {
        id: row.id,
        document_id: DocumentId::from_uuid(row.document_id),
        user_id: UserId::from_uuid(row.user_id),
        signature_img: row.signature_img,
        signed_at: row.signed_at,
        created_at: row.created_at,
    })
    .map_err(|err| DocumentRepositoryError::query(format!("invalid stored signature: {err}")))
}

fn rows_to_record(
    document: DocumentRow,
    signature: Option<SignatureRow>,
) -> Result<DocumentWithSignature, DocumentRepositoryError> {
    Ok(DocumentWithSignature::new(
        row_to_document(document)?,
        signature.map(row_to_signature).transpose()?,
    ))
}

enum SignOutcome {
    Signed(DocumentRow, SignatureRow),
    NotPending,
    Missing,
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<DocumentWithSignature>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(DocumentRow, Option<SignatureRow>)> = documents::table
            .left_join(signatures::table)
            .filter(documents::id.eq(id.as_uuid()))
            .select((DocumentRow::as_select(), Option::<SignatureRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(document, signature)| rows_to_record(document, signature))
            .transpose()
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::owner_id.eq(owner.as_uuid()))
            .order_by((documents::created_at.desc(), documents::id))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_document).collect()
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> Result<Document, DocumentRepositoryError> {
        let changeset = DocumentChangeset {
            name: update.name().map(|name| name.as_ref()),
            status: update.status().map(DocumentStatus::as_str),
            mime_type: update.mime_type(),
            size: update.size().map(size_to_db).transpose()?,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DocumentRow> = diesel::update(documents::table.find(id.as_uuid()))
            .set(&changeset)
            .returning(DocumentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_document(row),
            None => Err(DocumentRepositoryError::not_found(id.to_string())),
        }
    }

    async fn delete(&self, id: &DocumentId) -> Result<Document, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DocumentRow> = diesel::delete(documents::table.find(id.as_uuid()))
            .returning(DocumentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_document(row),
            None => Err(DocumentRepositoryError::not_found(id.to_string())),
        }
    }

    async fn sign(
        &self,
        signature: &NewSignature,
    ) -> Result<DocumentWithSignature, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let document_id = *signature.document_id.as_uuid();
        let now = Utc::now();
        let new_row = NewSignatureRow {
            id: Uuid::new_v4(),
            document_id,
            user_id: *signature.user_id.as_uuid(),
            signature_img: signature.signature_img.as_str(),
            signed_at: Some(now),
        };

        let outcome = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let updated: Option<DocumentRow> = diesel::update(
                        documents::table
                            .filter(documents::id.eq(document_id))
                            .filter(documents::status.eq(DocumentStatus::Pending.as_str())),
                    )
                    .set((
                        documents::status.eq(DocumentStatus::Signed.as_str()),
                        documents::updated_at.eq(now),
                    ))
                    .returning(DocumentRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;

                    let Some(document) = updated else {
                        let exists: Option<Uuid> = documents::table
                            .find(document_id)
                            .select(documents::id)
                            .first(conn)
                            .await
                            .optional()?;
                        return Ok(match exists {
                            Some(_) => SignOutcome::NotPending,
                            None => SignOutcome::Missing,
                        });
                    };

                    let stored: SignatureRow = diesel::insert_into(signatures::table)
                        .values(&new_row)
                        .returning(SignatureRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(SignOutcome::Signed(document, stored))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            SignOutcome::Signed(document, stored) => rows_to_record(document, Some(stored)),
            SignOutcome::NotPending => Err(DocumentRepositoryError::constraint(
                "document is not pending",
            )),
            SignOutcome::Missing => Err(DocumentRepositoryError::not_found(
                signature.document_id.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn document_row() -> DocumentRow {
        let now = Utc::now();
        DocumentRow {
            id: Uuid::new_v4(),
            name: "Contract.pdf".to_owned(),
            size: Some(2_097_152),
            mime_type: Some("application/pdf".to_owned()),
            file_key: "uploads/contract.pdf".to_owned(),
            status: "SIGNED".to_owned(),
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn rows_convert_to_documents(document_row: DocumentRow) {
        let document = row_to_document(document_row).expect("valid row");
        assert_eq!(document.status(), DocumentStatus::Signed);
        assert_eq!(document.size(), Some(2_097_152));
    }

    #[rstest]
    fn unknown_status_is_a_query_error(mut document_row: DocumentRow) {
        document_row.status = "ARCHIVED".to_owned();
        let err = row_to_document(document_row).expect_err("unknown status");
        assert!(matches!(err, DocumentRepositoryError::Query { .. }));
    }

    #[rstest]
    fn negative_size_is_a_query_error(mut document_row: DocumentRow) {
        document_row.size = Some(-1);
        assert!(row_to_document(document_row).is_err());
    }

    #[rstest]
    fn oversized_update_is_a_constraint_error() {
        assert_eq!(
            size_to_db(u64::MAX),
            Err(DocumentRepositoryError::constraint("size out of range"))
        );
    }

    #[rstest]
    fn signature_rows_attach_to_their_document(document_row: DocumentRow) {
        let signature = SignatureRow {
            id: Uuid::new_v4(),
            document_id: document_row.id,
            user_id: document_row.owner_id,
            signature_img: "data:image/png;base64,AAAA".to_owned(),
            signed_at: Some(Utc::now()),
            created_at: Utc::now(),
        };
        let record = rows_to_record(document_row, Some(signature)).expect("valid rows");
        let stored = record.signature().expect("signature present");
        assert_eq!(stored.document_id(), record.document().id());
    }
}
