//! Driving ports for the invitation lifecycle and user removal.

use async_trait::async_trait;

use crate::domain::{CleanupReport, CommandOutcome, Error, InviteReceipt, Zuid};

/// Raw invite form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitInviteRequest {
    /// Invitee name.
    pub name: String,
    /// Invitee email.
    pub email: String,
    /// Numeric access level, role name, or instance role ZUID.
    pub role: String,
    /// Selected location values.
    pub locations: Vec<String>,
}

/// Cancellation of one pending invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelInviteRequest {
    /// Invite to cancel.
    pub invite_zuid: Zuid,
    /// Invitee name as listed; used by composite-key lookups.
    pub name: String,
    /// Invitee email; used to find the shadow profile.
    pub email: String,
}

/// Removal of one user's role grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveUserRequest {
    /// User losing access.
    pub user_zuid: Zuid,
    /// Role grant to revoke.
    pub role_zuid: Zuid,
    /// User email; profile cleanup is skipped when absent.
    pub email: Option<String>,
    /// User display name; used by composite-key lookups.
    pub name: Option<String>,
}

/// Use-case port for sending and cancelling invitations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationCommand: Send + Sync {
    /// Validate, create the invite, then link a shadow profile.
    async fn submit_invite(
        &self,
        request: SubmitInviteRequest,
    ) -> Result<CommandOutcome<InviteReceipt>, Error>;

    /// Cancel the invite, then clean up its shadow profile.
    async fn cancel_invite(
        &self,
        request: CancelInviteRequest,
    ) -> Result<CommandOutcome<CleanupReport>, Error>;
}

/// Use-case port for revoking a user's access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRemovalCommand: Send + Sync {
    /// Revoke the role grant, then clean up the user's shadow profile.
    async fn remove_user(
        &self,
        request: RemoveUserRequest,
    ) -> Result<CommandOutcome<CleanupReport>, Error>;
}
