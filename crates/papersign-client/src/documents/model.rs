//! Wire shape of a document and the row the list view keeps.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::DocumentStatus;

/// Document as returned by `GET /api/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Document identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Storage key of the uploaded file.
    #[serde(default)]
    pub file_key: String,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Normalised row shown by [`super::DocumentListView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    /// Document identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Size in bytes; `None` when unknown.
    pub size: Option<u64>,
    /// MIME type; `None` when unknown or blank.
    pub mime_type: Option<String>,
    /// Where the file can be fetched from.
    pub file_url: String,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<ApiDocument> for DocumentRow {
    fn from(doc: ApiDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            size: doc.size,
            mime_type: doc.mime_type.filter(|mime| !mime.trim().is_empty()),
            file_url: doc.file_key,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn adapts_wire_document() {
        let doc: ApiDocument = serde_json::from_value(json!({
            "id": "1",
            "name": "a.pdf",
            "size": 2_097_152,
            "mimeType": "",
            "fileKey": "k1",
            "status": "PENDING",
            "ownerId": "0b5d3a3e-8f8e-4a6e-9d65-0d7d0d0e0f10",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T11:30:00+01:00"
        }))
        .expect("decode");

        let row = DocumentRow::from(doc);

        assert_eq!(row.id, "1");
        assert_eq!(row.size, Some(2_097_152));
        assert_eq!(row.mime_type, None);
        assert_eq!(row.file_url, "k1");
        assert_eq!(row.status, DocumentStatus::Pending);
        assert_eq!(row.updated_at.to_rfc3339(), "2024-03-02T10:30:00+00:00");
    }

    #[rstest]
    fn missing_optionals_become_none() {
        let doc: ApiDocument = serde_json::from_value(json!({
            "id": "2",
            "name": "b.pdf",
            "size": null,
            "fileKey": "k2",
            "status": "SIGNED",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        }))
        .expect("decode");

        let row = DocumentRow::from(doc);
        assert_eq!(row.size, None);
        assert_eq!(row.mime_type, None);
    }
}
