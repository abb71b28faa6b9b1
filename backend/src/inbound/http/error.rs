//! Maps domain errors onto HTTP responses.
//!
//! Upstream failures become gateway statuses (`502`/`503`) so operators can
//! tell a directory or content-store outage from a bad form submission.
//! Internal errors are logged in full and sent to clients redacted.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UpstreamRejected => StatusCode::BAD_GATEWAY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload clients see: internal errors keep only their trace id.
fn client_body(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

fn log_failure(error: &Error) {
    let trace_id = error.trace_id().unwrap_or_default();
    match error.code() {
        ErrorCode::UpstreamRejected | ErrorCode::ServiceUnavailable => {
            warn!(code = ?error.code(), trace_id, message = error.message(), "upstream call failed");
        }
        ErrorCode::InternalError => {
            error!(trace_id, message = error.message(), "request failed internally");
        }
        _ => {}
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_body(self))
    }
}

/// Client-side framework errors (bad paths, payloads) stay `invalid_request`;
/// anything else is treated as internal.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if err.as_response_error().status_code().is_client_error() {
            return Self::invalid_request(format!("invalid request: {err}"));
        }
        error!(error = %err, "framework error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}
