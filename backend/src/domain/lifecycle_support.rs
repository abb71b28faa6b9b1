//! Error mapping and input helpers shared by the lifecycle services.

use serde_json::json;

use crate::domain::ports::IdentityDirectoryError;
use crate::domain::{EmailAddress, Error, InviteValidationError};

/// Map a failed primary directory mutation onto a domain error.
pub(crate) fn map_directory_error(error: IdentityDirectoryError) -> Error {
    match error {
        IdentityDirectoryError::Transport { message } | IdentityDirectoryError::Timeout { message } => {
            Error::service_unavailable(format!("identity directory unavailable: {message}"))
        }
        IdentityDirectoryError::Rejected { status, message } => Error::upstream_rejected(format!(
            "identity directory rejected the request: {message}"
        ))
        .with_details(json!({ "status": status })),
        IdentityDirectoryError::Decode { message } => Error::upstream_rejected(format!(
            "identity directory returned an unreadable response: {message}"
        )),
    }
}

/// Map a form validation failure onto `invalid_request`, naming the field.
pub(crate) fn map_validation_error(error: InviteValidationError) -> Error {
    let field = match &error {
        InviteValidationError::EmptyName => "name",
        InviteValidationError::EmptyEmail | InviteValidationError::InvalidEmail => "email",
        InviteValidationError::UnknownRole { .. } => "role",
        InviteValidationError::BlankLocation => "locations",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Email that drives profile cleanup; `None` when absent or blank.
pub(crate) fn cleanup_email(raw: Option<&str>) -> Option<EmailAddress> {
    raw.and_then(EmailAddress::from_directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(IdentityDirectoryError::transport("refused"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityDirectoryError::timeout("elapsed"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityDirectoryError::rejected(404_u16, "no such invite"), ErrorCode::UpstreamRejected)]
    #[case(IdentityDirectoryError::decode("expected object"), ErrorCode::UpstreamRejected)]
    fn directory_errors_map_to_stable_codes(
        #[case] error: IdentityDirectoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_directory_error(error).code(), expected);
    }

    #[rstest]
    fn rejection_details_carry_upstream_status() {
        let error = map_directory_error(IdentityDirectoryError::rejected(409_u16, "dup"));
        assert_eq!(error.details(), Some(&json!({ "status": 409 })));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_cleanup_email_skips_cleanup(#[case] raw: Option<&str>) {
        assert_eq!(cleanup_email(raw), None);
    }

    #[rstest]
    #[case(" ops@localhost ", "ops@localhost")]
    #[case("not-an-email", "not-an-email")]
    fn directory_emails_skip_the_form_pattern(#[case] raw: &str, #[case] expected: &str) {
        let email = cleanup_email(Some(raw)).expect("non-blank email kept");
        assert_eq!(email.as_str(), expected);
    }
}
