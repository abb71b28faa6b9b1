//! Invitation drafts and their validated building blocks.
//!
//! An [`InviteDraft`] is what the invite form submits once every field has
//! been checked: a non-empty name, a mailbox-shaped email, a resolved
//! [`AccessLevel`], and a de-duplicated [`LocationSet`]. Nothing reaches the
//! accounts API until a draft exists.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised while building an [`InviteDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InviteValidationError {
    /// Name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,
    /// Role selector did not resolve to an access level.
    #[error("role `{selector}` does not map to a known access level")]
    UnknownRole { selector: String },
    /// A location entry was blank.
    #[error("locations must not include blank values")]
    BlankLocation,
}

/// Simple mailbox pattern: `local@domain.tld` without whitespace.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("mailbox pattern compiles")
});

fn is_mailbox(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Mailbox address accepted by the invite form.
///
/// # Examples
/// ```
/// use staff_admin::domain::EmailAddress;
///
/// assert!(EmailAddress::new(" jane@x.io ").is_ok());
/// assert!(EmailAddress::new("jane@x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email address.
    pub fn new(raw: &str) -> Result<Self, InviteValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InviteValidationError::EmptyEmail);
        }
        if !is_mailbox(trimmed) {
            return Err(InviteValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Trimmed address taken from a directory record, without the form
    /// pattern check; `None` when blank.
    ///
    /// Directory records are authoritative, so an address such as
    /// `ops@localhost` must still drive profile cleanup.
    pub fn from_directory(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lower-cased form used as the profile-link key.
    pub fn link_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric encoding of a role used in invite payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Level 1.
    Owner,
    /// Level 2.
    Admin,
    /// Level 3.
    Developer,
    /// Level 4.
    Seo,
    /// Level 5.
    Publisher,
    /// Level 6.
    Contributor,
}

impl AccessLevel {
    /// Every level, in numeric order.
    pub const ALL: [Self; 6] = [
        Self::Owner,
        Self::Admin,
        Self::Developer,
        Self::Seo,
        Self::Publisher,
        Self::Contributor,
    ];

    /// Value sent as `accessLevel`.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Owner => 1,
            Self::Admin => 2,
            Self::Developer => 3,
            Self::Seo => 4,
            Self::Publisher => 5,
            Self::Contributor => 6,
        }
    }

    /// Role name as the accounts API spells it.
    pub fn role_name(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Admin => "Admin",
            Self::Developer => "Developer",
            Self::Seo => "SEO",
            Self::Publisher => "Publisher",
            Self::Contributor => "Contributor",
        }
    }

    /// Look up a level by role name, ignoring case and surrounding spaces.
    pub fn from_role_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.role_name().eq_ignore_ascii_case(wanted))
    }

    /// Look up a level by its numeric value.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_u8() == level)
    }
}

impl FromStr for AccessLevel {
    type Err = InviteValidationError;

    /// Accepts either the numeric level (`"6"`) or the role name.
    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        let trimmed = selector.trim();
        let by_number = trimmed.parse::<u8>().ok().and_then(Self::from_level);
        by_number
            .or_else(|| Self::from_role_name(trimmed))
            .ok_or_else(|| InviteValidationError::UnknownRole {
                selector: trimmed.to_owned(),
            })
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role_name())
    }
}

/// Locations assigned to an invitee, in selection order without duplicates.
///
/// # Examples
/// ```
/// use staff_admin::domain::LocationSet;
///
/// let set = LocationSet::new(["loc-1", "loc-2", "loc-1"]).expect("valid");
/// assert_eq!(set.to_payload().as_deref(), Some("loc-1,loc-2"));
/// assert_eq!(LocationSet::default().to_payload(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSet(Vec<String>);

impl LocationSet {
    /// Trim entries, reject blanks, and drop repeats.
    pub fn new<I, S>(values: I) -> Result<Self, InviteValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = Vec::new();
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                return Err(InviteValidationError::BlankLocation);
            }
            if !seen.iter().any(|existing: &String| existing == trimmed) {
                seen.push(trimmed.to_owned());
            }
        }
        Ok(Self(seen))
    }

    /// Selected location values.
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Whether no location was selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form for payloads; `None` when empty so it serialises as `null`.
    pub fn to_payload(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

/// Fully validated invitation ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteDraft {
    name: String,
    email: EmailAddress,
    access_level: AccessLevel,
    locations: LocationSet,
}

impl InviteDraft {
    /// Build a draft from already-resolved parts.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        access_level: AccessLevel,
        locations: LocationSet,
    ) -> Result<Self, InviteValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InviteValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            email: EmailAddress::new(email)?,
            access_level,
            locations,
        })
    }

    /// Invitee name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Invitee email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Access level granted on acceptance.
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Assigned locations.
    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }
}
