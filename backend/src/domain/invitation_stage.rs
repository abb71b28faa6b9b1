//! Stage machine for one invitation attempt.
//!
//! ```text
//! Drafting -> Submitting -> Invited -> ProfileLinking -> Complete
//!                 |    |                      |
//!                 |    +--> Complete          v
//!                 v                   ProfileLinkFailed
//!           InviteFailed
//! ```
//!
//! `Submitting -> Complete` is taken when the accounts API answers with a
//! 2xx other than 201: the invite exists, but no profile is linked.

use std::fmt;

use serde::Serialize;

/// Where an invitation attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStage {
    /// Form fields are being validated.
    Drafting,
    /// Invite creation call is in flight.
    Submitting,
    /// The directory accepted the invite.
    Invited,
    /// Shadow profile creation is in flight.
    ProfileLinking,
    /// Terminal success.
    Complete,
    /// Terminal: invite creation failed; nothing was created.
    InviteFailed,
    /// Terminal: the invite exists but its shadow profile does not.
    ProfileLinkFailed,
}

/// Events that move an attempt between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationEvent {
    /// Draft validated; the remote call starts.
    Submit,
    /// Directory answered 201 Created.
    InviteCreated,
    /// Directory answered another 2xx; profile linking is skipped.
    InviteAcceptedWithoutCreation,
    /// Directory call failed or was rejected.
    InviteRejected,
    /// Shadow profile creation starts.
    LinkProfile,
    /// Shadow profile was created.
    ProfileLinked,
    /// Shadow profile creation failed.
    ProfileLinkRejected,
}

/// Attempted transition that the stage machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invitation cannot handle {event:?} while {stage}")]
pub struct InvalidTransition {
    /// Stage at the time of the event.
    pub stage: InvitationStage,
    /// Rejected event.
    pub event: InvitationEvent,
}

impl InvitationStage {
    /// Apply `event`, returning the next stage.
    ///
    /// # Examples
    /// ```
    /// use staff_admin::domain::{InvitationEvent, InvitationStage};
    ///
    /// let stage = InvitationStage::Drafting
    ///     .advance(InvitationEvent::Submit)
    ///     .and_then(|s| s.advance(InvitationEvent::InviteCreated));
    /// assert_eq!(stage, Ok(InvitationStage::Invited));
    /// ```
    pub fn advance(self, event: InvitationEvent) -> Result<Self, InvalidTransition> {
        use InvitationEvent as E;
        let next = match (self, event) {
            (Self::Drafting, E::Submit) => Self::Submitting,
            (Self::Submitting, E::InviteCreated) => Self::Invited,
            (Self::Submitting, E::InviteAcceptedWithoutCreation) => Self::Complete,
            (Self::Submitting, E::InviteRejected) => Self::InviteFailed,
            (Self::Invited, E::LinkProfile) => Self::ProfileLinking,
            (Self::ProfileLinking, E::ProfileLinked) => Self::Complete,
            (Self::ProfileLinking, E::ProfileLinkRejected) => Self::ProfileLinkFailed,
            (stage, event) => return Err(InvalidTransition { stage, event }),
        };
        Ok(next)
    }

    /// Whether no further events are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Complete | Self::InviteFailed | Self::ProfileLinkFailed
        )
    }
}

impl fmt::Display for InvitationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Drafting => "drafting",
            Self::Submitting => "submitting",
            Self::Invited => "invited",
            Self::ProfileLinking => "profile_linking",
            Self::Complete => "complete",
            Self::InviteFailed => "invite_failed",
            Self::ProfileLinkFailed => "profile_link_failed",
        };
        f.write_str(label)
    }
}
