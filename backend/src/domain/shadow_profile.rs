//! Shadow profiles: content records mirroring invited and active users.
//!
//! A shadow profile lives in the instance content store, outside the
//! directory. It is created when an invite succeeds and deleted when the
//! user's access is revoked. [`ShadowProfileRef`] is the explicit join key
//! recorded at creation time; lookup by email is only a fallback for
//! profiles created before links were recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmailAddress, LocationSet, Zuid};

/// Address of one shadow profile in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShadowProfileRef {
    /// Content model holding the profile.
    #[schema(value_type = String, example = "6-9bfe8d9ea7-nh4w3x")]
    pub model_zuid: Zuid,
    /// Content item identifier.
    #[schema(value_type = String, example = "7-c6a5e1f7c2-6pw7kd")]
    pub item_zuid: Zuid,
}

/// Fields written to a new shadow profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowProfileDraft {
    /// Display name; also used as the page title and link text.
    pub name: String,
    /// Invitee email.
    pub email: EmailAddress,
    /// Assigned locations.
    pub locations: LocationSet,
}

/// One publish version of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishVersion {
    /// Publishing identifier used for unpublishing.
    pub zuid: Zuid,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Pick the publish version with the newest `updated_at`.
///
/// Ties resolve to the later entry in `versions`.
///
/// # Examples
/// ```
/// use staff_admin::domain::latest_publish_version;
///
/// assert!(latest_publish_version(&[]).is_none());
/// ```
pub fn latest_publish_version(versions: &[PublishVersion]) -> Option<&PublishVersion> {
    versions.iter().max_by_key(|version| version.updated_at)
}

/// How cleanup locates profiles that have no recorded link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileLookup {
    /// Query the dataset host by email.
    #[default]
    Email,
    /// Full-text search on the composite `"name - email"` key.
    CompositeKey,
}

impl ProfileLookup {
    /// Parse a configuration value (`email` or `composite`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "composite" | "composite_key" | "composite-key" => Some(Self::CompositeKey),
            _ => None,
        }
    }
}

/// Build the composite search key used by content search.
///
/// The key is whitespace-sensitive: a name entered with different spacing
/// produces a different key and will not match.
pub fn composite_search_key(name: &str, email: &str) -> String {
    format!("{name} - {email}")
}
