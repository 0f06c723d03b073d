//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` [`Error`] whose `details`
//! name the offending field, so clients can attach messages inline.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{DocumentId, Error, LoginValidationError};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidUuid,
    InvalidValue,
    InvalidBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidValue => "invalid_value",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": ValidationCode::InvalidValue.as_str(),
    }))
}

/// Parse a document id from a path segment.
pub(crate) fn parse_document_id(raw: &str) -> Result<DocumentId, Error> {
    DocumentId::new(raw).map_err(|_| invalid_uuid_error(ID_FIELD, raw))
}

/// Map a credential or registration validation failure onto its field.
pub(crate) fn login_validation_error(error: LoginValidationError) -> Error {
    let field = FieldName::new(error.field());
    invalid_field_error(field, error.to_string())
}

fn invalid_body_error(message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": ValidationCode::InvalidBody.as_str(),
    }))
}

/// JSON extractor configuration: 2 MiB limit and domain error payloads.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT_BYTES)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let message = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    "request body exceeds the 2 MiB limit".to_owned()
                }
                JsonPayloadError::ContentType => {
                    "request body must be application/json".to_owned()
                }
                other => format!("invalid request body: {other}"),
            };
            invalid_body_error(message).into()
        })
}

/// Path extractor configuration returning domain error payloads.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        invalid_body_error(format!("invalid path: {err}")).into()
    })
}
