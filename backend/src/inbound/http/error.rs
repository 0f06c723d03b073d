//! Turns domain [`Error`]s into JSON responses.
//!
//! Internal failures and store outages carry adapter text (pool errors,
//! connection strings), so their messages and details are replaced with a
//! fixed public message. The original is logged against the trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const INTERNAL_MESSAGE: &str = "Internal server error";
pub(crate) const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Public body for `error`; `None` when it can be shown as is.
fn public_view(error: &Error) -> Option<Error> {
    let trace_id = error.trace_id().unwrap_or("-");
    let public = match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id, cause = error.message(), "internal error redacted");
            Error::internal(INTERNAL_MESSAGE)
        }
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id, cause = error.message(), "store outage redacted");
            Error::service_unavailable(UNAVAILABLE_MESSAGE)
        }
        _ => return None,
    };
    Some(match error.trace_id() {
        Some(id) => public.with_trace_id(id.to_owned()),
        None => public,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        match public_view(self) {
            Some(public) => builder.json(public),
            None => builder.json(self),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error reached a handler");
        Error::internal(INTERNAL_MESSAGE)
    }
}
