//! Driven port for the accounts API (the identity directory).
//!
//! The domain owns the request and response shapes; adapters own URLs,
//! headers, envelopes, and the mapping of HTTP statuses onto
//! [`IdentityDirectoryError`].

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{InstanceUser, InviteDraft, PendingInvite, Role, Zuid};

define_port_error! {
    /// Errors surfaced while calling the identity directory.
    pub enum IdentityDirectoryError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "identity directory transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "identity directory timeout: {message}",
        /// The directory answered with a status the operation does not accept.
        Rejected { status: u16, message: String } =>
            "identity directory rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "identity directory response decode failed: {message}",
    }
}

/// How the directory answered a successful invite submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteSubmission {
    /// 201 Created; shadow profile linking should follow.
    Created {
        /// Invite identifier when the response carried one.
        invite_zuid: Option<Zuid>,
    },
    /// Any other 2xx; the invite stands but no profile is linked.
    Accepted {
        /// Status the directory returned.
        status: u16,
    },
}

/// Port for reading and mutating instance users, roles, and invites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// `GET /instances/{instance}/users/roles`.
    async fn list_instance_users(&self) -> Result<Vec<InstanceUser>, IdentityDirectoryError>;

    /// `GET /instances/{instance}/roles`.
    async fn list_instance_roles(&self) -> Result<Vec<Role>, IdentityDirectoryError>;

    /// `GET /instances/{instance}/users/pending`.
    async fn list_pending_invites(&self) -> Result<Vec<PendingInvite>, IdentityDirectoryError>;

    /// `POST /invites`. Non-2xx statuses are [`IdentityDirectoryError::Rejected`].
    async fn create_invite(
        &self,
        draft: &InviteDraft,
    ) -> Result<InviteSubmission, IdentityDirectoryError>;

    /// `PUT /invites/{id}?action=cancel`. Only 200 counts as success.
    async fn cancel_invite(&self, invite_zuid: &Zuid) -> Result<(), IdentityDirectoryError>;

    /// `DELETE /users/{user}/roles/{role}`. Only 200 counts as success.
    async fn revoke_role(
        &self,
        user_zuid: &Zuid,
        role_zuid: &Zuid,
    ) -> Result<(), IdentityDirectoryError>;
}
