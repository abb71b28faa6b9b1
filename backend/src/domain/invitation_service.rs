//! Invitation lifecycle: submit an invite, link its shadow profile, and
//! cancel it again.
//!
//! The directory mutation is the primary step and its failure is returned as
//! an [`Error`]. Profile linking and cleanup are follow-up steps; their
//! failures are reported inside the [`CommandOutcome`] and never roll back
//! the invite.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::lifecycle_support::{cleanup_email, map_directory_error, map_validation_error};
use crate::domain::ports::{
    CancelInviteRequest, IdentityDirectory, InvitationCommand, InviteSubmission,
    ShadowProfileLinks, ShadowProfileLookup, ShadowProfileStore, SubmitInviteRequest,
};
use crate::domain::{
    AccessLevel, CleanupReport, CommandOutcome, EmailAddress, Error, InvitationEvent,
    InvitationStage, InviteDraft, InviteReceipt, InviteValidationError, LifecycleStep,
    LocationSet, ReadStateCache, ReadStateKey, ShadowProfileCleanup, ShadowProfileDraft,
    ShadowProfileRef, StepFailure, Zuid,
};

/// Invitation service implementing [`InvitationCommand`].
pub struct InvitationLifecycleService<D, S, K, P> {
    directory: Arc<D>,
    store: Arc<S>,
    links: Arc<K>,
    cleanup: ShadowProfileCleanup<S, K, P>,
    cache: Arc<ReadStateCache>,
}

impl<D, S, K, P> InvitationLifecycleService<D, S, K, P>
where
    D: IdentityDirectory,
    S: ShadowProfileStore,
    K: ShadowProfileLinks,
    P: ShadowProfileLookup,
{
    /// Create the service from its adapters and the shared read-state cache.
    pub fn new(
        directory: Arc<D>,
        store: Arc<S>,
        links: Arc<K>,
        lookup: Arc<P>,
        cache: Arc<ReadStateCache>,
    ) -> Self {
        let cleanup = ShadowProfileCleanup::new(Arc::clone(&store), Arc::clone(&links), lookup);
        Self {
            directory,
            store,
            links,
            cleanup,
            cache,
        }
    }

    async fn build_draft(&self, request: &SubmitInviteRequest) -> Result<InviteDraft, Error> {
        if request.name.trim().is_empty() {
            return Err(map_validation_error(InviteValidationError::EmptyName));
        }
        EmailAddress::new(&request.email).map_err(map_validation_error)?;
        let locations = LocationSet::new(&request.locations).map_err(map_validation_error)?;
        let access_level = self.resolve_access_level(&request.role).await?;
        InviteDraft::try_from_parts(&request.name, &request.email, access_level, locations)
            .map_err(map_validation_error)
    }

    /// Resolve a numeric level or role name locally, else an instance role ZUID.
    async fn resolve_access_level(&self, selector: &str) -> Result<AccessLevel, Error> {
        let unknown = || {
            map_validation_error(InviteValidationError::UnknownRole {
                selector: selector.trim().to_owned(),
            })
        };
        if let Ok(level) = selector.parse::<AccessLevel>() {
            return Ok(level);
        }
        let Ok(role_zuid) = Zuid::new(selector.trim()) else {
            return Err(unknown());
        };

        let roles = self
            .directory
            .list_instance_roles()
            .await
            .map_err(map_directory_error)?;
        roles
            .iter()
            .find(|role| role.zuid == role_zuid)
            .and_then(|role| AccessLevel::from_role_name(&role.name))
            .ok_or_else(unknown)
    }

    async fn link_profile(
        &self,
        draft: &InviteDraft,
        stage: InvitationStage,
    ) -> Result<Result<ShadowProfileRef, StepFailure>, Error> {
        let email = draft.email();
        let stage = transition(stage, InvitationEvent::LinkProfile, email)?;
        let profile_draft = ShadowProfileDraft {
            name: draft.name().to_owned(),
            email: email.clone(),
            locations: draft.locations().clone(),
        };

        match self.store.create_profile(&profile_draft).await {
            Ok(profile) => {
                if let Err(error) = self.links.record(email, &profile).await {
                    warn!(
                        %email,
                        %error,
                        item_zuid = %profile.item_zuid,
                        "profile link not recorded; cleanup will fall back to lookup"
                    );
                }
                transition(stage, InvitationEvent::ProfileLinked, email)?;
                Ok(Ok(profile))
            }
            Err(error) => {
                warn!(%email, %error, "shadow profile creation failed; invite stands");
                transition(stage, InvitationEvent::ProfileLinkRejected, email)?;
                Ok(Err(StepFailure::new(
                    LifecycleStep::LinkShadowProfile,
                    error.to_string(),
                )))
            }
        }
    }
}

/// Advance the stage machine and log the transition.
fn transition(
    stage: InvitationStage,
    event: InvitationEvent,
    email: &EmailAddress,
) -> Result<InvitationStage, Error> {
    let next = stage
        .advance(event)
        .map_err(|error| Error::internal(error.to_string()))?;
    info!(
        %email,
        from = %stage,
        to = %next,
        terminal = next.is_terminal(),
        "invitation stage changed"
    );
    Ok(next)
}

#[async_trait]
impl<D, S, K, P> InvitationCommand for InvitationLifecycleService<D, S, K, P>
where
    D: IdentityDirectory,
    S: ShadowProfileStore,
    K: ShadowProfileLinks,
    P: ShadowProfileLookup,
{
    async fn submit_invite(
        &self,
        request: SubmitInviteRequest,
    ) -> Result<CommandOutcome<InviteReceipt>, Error> {
        let draft = self.build_draft(&request).await?;
        let email = draft.email();
        let stage = transition(InvitationStage::Drafting, InvitationEvent::Submit, email)?;

        let submission = match self.directory.create_invite(&draft).await {
            Ok(submission) => submission,
            Err(error) => {
                warn!(%email, kind = error.kind(), %error, "invite creation failed");
                transition(stage, InvitationEvent::InviteRejected, email)?;
                return Err(map_directory_error(error));
            }
        };

        let mut receipt = InviteReceipt {
            invite_zuid: None,
            shadow_profile: None,
        };
        let mut failures = Vec::new();
        match submission {
            InviteSubmission::Created { invite_zuid } => {
                let stage = transition(stage, InvitationEvent::InviteCreated, email)?;
                if let Some(zuid) = &invite_zuid {
                    info!(%email, invite_zuid = %zuid, "invite created");
                }
                receipt.invite_zuid = invite_zuid;
                match self.link_profile(&draft, stage).await? {
                    Ok(profile) => receipt.shadow_profile = Some(profile),
                    Err(failure) => failures.push(failure),
                }
            }
            InviteSubmission::Accepted { status } => {
                warn!(%email, status, "invite accepted without 201; shadow profile not linked");
                transition(stage, InvitationEvent::InviteAcceptedWithoutCreation, email)?;
            }
        }

        let mut outcome = CommandOutcome::new(receipt);
        outcome.extend(failures);
        self.cache.invalidate(ReadStateKey::PendingInvites).await;
        Ok(outcome)
    }

    async fn cancel_invite(
        &self,
        request: CancelInviteRequest,
    ) -> Result<CommandOutcome<CleanupReport>, Error> {
        if let Err(error) = self.directory.cancel_invite(&request.invite_zuid).await {
            warn!(
                invite_zuid = %request.invite_zuid,
                kind = error.kind(),
                %error,
                "invite cancellation failed"
            );
            return Err(map_directory_error(error));
        }
        info!(invite_zuid = %request.invite_zuid, "invite cancelled");
        self.cache.invalidate(ReadStateKey::PendingInvites).await;

        let Some(email) = cleanup_email(Some(&request.email)) else {
            info!(invite_zuid = %request.invite_zuid, "no email on invite; skipping profile cleanup");
            return Ok(CommandOutcome::new(CleanupReport::default()));
        };
        Ok(self.cleanup.run(&request.name, &email).await)
    }
}

#[cfg(test)]
#[path = "invitation_service_tests.rs"]
mod tests;
