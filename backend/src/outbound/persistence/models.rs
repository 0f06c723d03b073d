//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{documents, signatures, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

/// Insertable struct for creating new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub name: String,
    pub size: Option<i64>,
    pub mime_type: Option<String>,
    pub file_key: String,
    pub status: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a document row.
///
/// There is no `id` column here, so updates can never rewrite the key.
/// `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = documents)]
pub(crate) struct DocumentChangeset<'a> {
    pub name: Option<&'a str>,
    pub status: Option<&'a str>,
    pub mime_type: Option<&'a str>,
    pub size: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the signatures table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = signatures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SignatureRow {
    pub id: Uuid,
    pub document_id: Uuid,
    pub user_id: Uuid,
    pub signature_img: String,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for recording a signature.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = signatures)]
pub(crate) struct NewSignatureRow<'a> {
    pub id: Uuid,
    pub document_id: Uuid,
    pub user_id: Uuid,
    pub signature_img: &'a str,
    pub signed_at: Option<DateTime<Utc>>,
}
