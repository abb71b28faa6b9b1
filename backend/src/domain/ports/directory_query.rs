//! Driving port for the panel's read-state.
//!
//! Reads fail softly: an unavailable directory yields `None` ("no data
//! yet") instead of an error, and location options degrade to an empty
//! list so the multi-select simply shows no choices.

use async_trait::async_trait;

use crate::domain::{InstanceUser, LocationOption, PendingInvite, Role};

/// Use-case port for listing directory data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Users holding a role in the instance, including system accounts.
    async fn instance_users(&self) -> Option<Vec<InstanceUser>>;

    /// Roles defined for the instance.
    async fn instance_roles(&self) -> Option<Vec<Role>>;

    /// Outstanding invitations.
    async fn pending_invites(&self) -> Option<Vec<PendingInvite>>;

    /// Selectable locations; empty when the dataset is unavailable.
    async fn location_options(&self) -> Vec<LocationOption>;
}
