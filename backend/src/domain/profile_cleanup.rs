//! Shadow profile cleanup shared by invite cancellation and user removal.
//!
//! Targets come from the recorded links first; the configured lookup only
//! runs when nothing was linked. Each target is unpublished (latest version
//! only) and then deleted. Failures are collected as [`StepFailure`]s and
//! never abort the remaining targets.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{ShadowProfileLinks, ShadowProfileLookup, ShadowProfileStore};
use crate::domain::{
    CleanupReport, CommandOutcome, EmailAddress, LifecycleStep, ShadowProfileRef, StepFailure,
    latest_publish_version,
};

/// Cleanup saga over the content store, link storage, and fallback lookup.
pub struct ShadowProfileCleanup<S, K, P> {
    store: Arc<S>,
    links: Arc<K>,
    lookup: Arc<P>,
}

impl<S, K, P> Clone for ShadowProfileCleanup<S, K, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            links: Arc::clone(&self.links),
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<S, K, P> ShadowProfileCleanup<S, K, P>
where
    S: ShadowProfileStore,
    K: ShadowProfileLinks,
    P: ShadowProfileLookup,
{
    /// Create a cleanup step over the given adapters.
    pub fn new(store: Arc<S>, links: Arc<K>, lookup: Arc<P>) -> Self {
        Self {
            store,
            links,
            lookup,
        }
    }

    /// Remove every shadow profile belonging to `email`.
    ///
    /// `name` is only consulted by composite-key lookups.
    pub async fn run(&self, name: &str, email: &EmailAddress) -> CommandOutcome<CleanupReport> {
        let mut failures = Vec::new();
        let targets = self.resolve_targets(name, email, &mut failures).await;
        if targets.is_empty() && failures.is_empty() {
            info!(%email, "no shadow profile found for cleanup");
        }

        let mut deleted = Vec::with_capacity(targets.len());
        for target in targets {
            self.unpublish_latest(&target, &mut failures).await;
            match self.store.delete_profile(&target).await {
                Ok(()) => {
                    info!(
                        %email,
                        model_zuid = %target.model_zuid,
                        item_zuid = %target.item_zuid,
                        "shadow profile deleted"
                    );
                    deleted.push(target);
                }
                Err(error) => {
                    warn!(
                        %email,
                        %error,
                        item_zuid = %target.item_zuid,
                        "shadow profile delete failed; keeping link for retry"
                    );
                    self.restore_link(email, &target).await;
                    failures.push(StepFailure::for_target(
                        LifecycleStep::DeleteShadowProfile,
                        &target,
                        error.to_string(),
                    ));
                }
            }
        }

        let mut outcome = CommandOutcome::new(CleanupReport { deleted });
        outcome.extend(failures);
        outcome
    }

    async fn resolve_targets(
        &self,
        name: &str,
        email: &EmailAddress,
        failures: &mut Vec<StepFailure>,
    ) -> Vec<ShadowProfileRef> {
        match self.links.take(email).await {
            Ok(linked) if !linked.is_empty() => return linked,
            Ok(_) => {}
            Err(error) => {
                warn!(%email, %error, "profile link storage unavailable; using lookup");
            }
        }

        match self.lookup.find_profiles(name, email).await {
            Ok(found) => found,
            Err(error) => {
                warn!(%email, %error, "shadow profile lookup failed");
                failures.push(StepFailure::new(
                    LifecycleStep::LocateShadowProfile,
                    error.to_string(),
                ));
                Vec::new()
            }
        }
    }

    async fn unpublish_latest(&self, target: &ShadowProfileRef, failures: &mut Vec<StepFailure>) {
        let versions = match self.store.list_publishings(target).await {
            Ok(versions) => versions,
            Err(error) => {
                warn!(%error, item_zuid = %target.item_zuid, "listing publishings failed");
                failures.push(StepFailure::for_target(
                    LifecycleStep::UnpublishShadowProfile,
                    target,
                    error.to_string(),
                ));
                return;
            }
        };

        let Some(latest) = latest_publish_version(&versions) else {
            info!(item_zuid = %target.item_zuid, "item is not currently published");
            return;
        };

        if let Err(error) = self.store.unpublish(target, &latest.zuid).await {
            warn!(
                %error,
                item_zuid = %target.item_zuid,
                version = %latest.zuid,
                "unpublish failed; deleting anyway"
            );
            failures.push(StepFailure::for_target(
                LifecycleStep::UnpublishShadowProfile,
                target,
                error.to_string(),
            ));
        }
    }

    async fn restore_link(&self, email: &EmailAddress, target: &ShadowProfileRef) {
        if let Err(error) = self.links.record(email, target).await {
            warn!(
                %email,
                %error,
                item_zuid = %target.item_zuid,
                "could not restore profile link"
            );
        }
    }
}

#[cfg(test)]
#[path = "profile_cleanup_tests.rs"]
mod tests;
