//! Identity directory records: users, roles, pending invites, and locations.
//!
//! These mirror what the accounts API and the locations dataset return. The
//! service never mutates them directly; it only reads them, derives invite
//! payloads from them, and revokes role grants.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ZUID prefix reserved for platform system accounts hidden from operators.
pub const SYSTEM_USER_PREFIX: &str = "55-";

/// Validation errors for directory identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZuidValidationError {
    /// Identifier was blank.
    #[error("identifier must not be empty")]
    Empty,
    /// Identifier contained whitespace or a path separator.
    #[error("identifier must not contain whitespace, '/' or '?'")]
    InvalidCharacters,
}

/// Opaque directory identifier (users, roles, invites, content items).
///
/// ZUIDs are interpolated into upstream URL paths, so they may not contain
/// whitespace or path/query delimiters.
///
/// # Examples
/// ```
/// use staff_admin::domain::Zuid;
///
/// let zuid = Zuid::new("5-abc-123").expect("valid zuid");
/// assert_eq!(zuid.as_ref(), "5-abc-123");
/// assert!(Zuid::new("5-abc/../x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Zuid(String);

impl Zuid {
    /// Validate and construct a [`Zuid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ZuidValidationError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ZuidValidationError::Empty);
        }
        if raw
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, '/' | '?' | '#'))
        {
            return Err(ZuidValidationError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Zuid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Zuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Zuid {
    type Error = ZuidValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Zuid> for String {
    fn from(value: Zuid) -> Self {
        value.0
    }
}

/// Role granted to a user within the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role identifier.
    #[schema(value_type = String, example = "30-86f8ccec82-swp72s")]
    pub zuid: Zuid,
    /// Role display name, e.g. `Contributor`.
    pub name: String,
}

/// Active user of the instance with their role grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstanceUser {
    /// User identifier.
    #[schema(value_type = String, example = "5-84d1e6d4ae-s3m974")]
    pub zuid: Zuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Primary email address.
    pub email: String,
    /// Role held in this instance.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl InstanceUser {
    /// Platform system accounts are never shown to operators.
    pub fn is_system_user(&self) -> bool {
        self.zuid.as_str().starts_with(SYSTEM_USER_PREFIX)
    }

    /// `"first last"` as the panel displays it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match over email, full name, and ZUID.
    ///
    /// `term` is expected to be lower-cased already.
    fn matches_search(&self, term: &str) -> bool {
        [
            self.email.to_lowercase(),
            self.full_name().to_lowercase(),
            self.zuid.as_str().to_lowercase(),
        ]
        .iter()
        .any(|key| key.contains(term))
    }
}

/// Apply the panel's user-table filter.
///
/// System accounts are dropped; a blank search keeps every remaining user.
/// A non-blank term is lowercased but not trimmed, so surrounding spaces
/// take part in the match.
///
/// # Examples
/// ```
/// use staff_admin::domain::visible_users;
///
/// assert!(visible_users(Vec::new(), Some("jane")).is_empty());
/// ```
pub fn visible_users(users: Vec<InstanceUser>, search: Option<&str>) -> Vec<InstanceUser> {
    let raw = search.unwrap_or_default();
    let blank = raw.trim().is_empty();
    let term = raw.to_lowercase();
    users
        .into_iter()
        .filter(|user| !user.is_system_user())
        .filter(|user| blank || user.matches_search(&term))
        .collect()
}

/// Invitation sent but not yet accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingInvite {
    /// Invite identifier used for cancellation.
    #[schema(value_type = String, example = "10-a8d4b2c1e0-7hqk2m")]
    pub invite_zuid: Zuid,
    /// Invitee name as entered when inviting.
    pub name: String,
    /// Invitee email.
    pub email: String,
}

/// Entry in the location multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationOption {
    /// Stored value sent in invite payloads.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}
