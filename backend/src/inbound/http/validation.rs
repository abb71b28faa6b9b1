//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, Zuid};

/// Validation error codes for path and query failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidZuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidZuid => "invalid_zuid",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_zuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid ZUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidZuid.as_str(),
    }))
}

/// Parse a path segment into a [`Zuid`].
pub(crate) fn parse_zuid(value: String, field: FieldName) -> Result<Zuid, Error> {
    Zuid::new(value.as_str()).map_err(|_| invalid_zuid_error(field, &value))
}
