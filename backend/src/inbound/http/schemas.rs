//! JSON shapes exchanged with the panel.
//!
//! Reads are wrapped as `{ "data": ... }`; `data` is `null` when the
//! directory could not be reached. Commands answer with a status, the
//! follow-up failures, and what was produced.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CleanupReport, CommandOutcome, CompletionStatus, InstanceUser, InviteReceipt, LocationOption,
    PendingInvite, Role, ShadowProfileRef, StepFailure,
};

/// `GET /users` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersEnvelope {
    /// Visible users, or `null` when unavailable.
    pub data: Option<Vec<InstanceUser>>,
}

/// `GET /roles` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RolesEnvelope {
    /// Instance roles, or `null` when unavailable.
    pub data: Option<Vec<Role>>,
}

/// `GET /invites/pending` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingInvitesEnvelope {
    /// Outstanding invites, or `null` when unavailable.
    pub data: Option<Vec<PendingInvite>>,
}

/// `GET /locations` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationsEnvelope {
    /// Location options; empty when the dataset is unavailable.
    pub data: Vec<LocationOption>,
}

/// Search parameters for `GET /users`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Case-insensitive match on email, full name, or ZUID.
    pub search: Option<String>,
}

/// Role selector as sent by the invite form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RoleSelector {
    /// Numeric access level (1-6).
    Level(u8),
    /// Role name or instance role ZUID.
    Named(String),
}

impl RoleSelector {
    /// Selector in the form the domain resolves.
    pub fn into_selector(self) -> String {
        match self {
            Self::Level(level) => level.to_string(),
            Self::Named(value) => value,
        }
    }
}

/// `POST /invites` body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteBody {
    /// Invitee name.
    pub name: String,
    /// Invitee email.
    pub email: String,
    /// Access level, role name, or role ZUID.
    pub role: RoleSelector,
    /// Selected location values.
    #[serde(default)]
    pub locations: Vec<String>,
}

/// `PUT /invites/{inviteZuid}/cancel` body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelInviteBody {
    /// Invitee name as listed.
    #[serde(default)]
    pub name: String,
    /// Invitee email.
    pub email: String,
}

/// Query for `DELETE /users/{userZuid}/roles/{roleZuid}`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveUserQuery {
    /// Email whose shadow profile is cleaned up; cleanup is skipped when absent.
    pub email: Option<String>,
    /// Display name for composite-key lookups.
    pub name: Option<String>,
}

/// Result of `POST /invites`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteOutcomeResponse {
    /// `complete` or `partial`.
    pub status: CompletionStatus,
    /// Follow-up steps that failed.
    pub failures: Vec<StepFailure>,
    /// Invite identifier when the directory returned one.
    pub invite_zuid: Option<String>,
    /// Linked shadow profile.
    pub shadow_profile: Option<ShadowProfileRef>,
}

impl From<CommandOutcome<InviteReceipt>> for InviteOutcomeResponse {
    fn from(outcome: CommandOutcome<InviteReceipt>) -> Self {
        let status = outcome.status();
        let (receipt, failures) = outcome.into_parts();
        Self {
            status,
            failures,
            invite_zuid: receipt.invite_zuid.map(String::from),
            shadow_profile: receipt.shadow_profile,
        }
    }
}

/// Result of invite cancellation and user removal.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupOutcomeResponse {
    /// `complete` or `partial`.
    pub status: CompletionStatus,
    /// Follow-up steps that failed.
    pub failures: Vec<StepFailure>,
    /// Shadow profiles deleted.
    pub deleted: Vec<ShadowProfileRef>,
}

impl From<CommandOutcome<CleanupReport>> for CleanupOutcomeResponse {
    fn from(outcome: CommandOutcome<CleanupReport>) -> Self {
        let status = outcome.status();
        let (report, failures) = outcome.into_parts();
        Self {
            status,
            failures,
            deleted: report.deleted,
        }
    }
}
