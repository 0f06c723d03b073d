//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Lower-cased login email, unique via `users_email_key`.
        email -> Varchar,
        display_name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Uploaded documents awaiting or holding a signature.
    documents (id) {
        id -> Uuid,
        name -> Varchar,
        size -> Nullable<Int8>,
        mime_type -> Nullable<Varchar>,
        file_key -> Text,
        /// One of `PENDING`, `SIGNED`, `REJECTED` (check constraint).
        status -> Varchar,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// At most one signature per document; removed with its document.
    signatures (id) {
        id -> Uuid,
        document_id -> Uuid,
        user_id -> Uuid,
        signature_img -> Text,
        signed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(documents -> users (owner_id));
diesel::joinable!(signatures -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(users, documents, signatures);
