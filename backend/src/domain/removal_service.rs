//! User removal: revoke one role grant, then clean up the shadow profile.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::lifecycle_support::{cleanup_email, map_directory_error};
use crate::domain::ports::{
    IdentityDirectory, RemoveUserRequest, ShadowProfileLinks, ShadowProfileLookup,
    ShadowProfileStore, UserRemovalCommand,
};
use crate::domain::{
    CleanupReport, CommandOutcome, Error, ReadStateCache, ReadStateKey, ShadowProfileCleanup,
};

/// Removal service implementing [`UserRemovalCommand`].
pub struct UserRemovalService<D, S, K, P> {
    directory: Arc<D>,
    cleanup: ShadowProfileCleanup<S, K, P>,
    cache: Arc<ReadStateCache>,
}

impl<D, S, K, P> UserRemovalService<D, S, K, P> {
    /// Create the service.
    pub fn new(
        directory: Arc<D>,
        cleanup: ShadowProfileCleanup<S, K, P>,
        cache: Arc<ReadStateCache>,
    ) -> Self {
        Self {
            directory,
            cleanup,
            cache,
        }
    }
}

#[async_trait]
impl<D, S, K, P> UserRemovalCommand for UserRemovalService<D, S, K, P>
where
    D: IdentityDirectory,
    S: ShadowProfileStore,
    K: ShadowProfileLinks,
    P: ShadowProfileLookup,
{
    async fn remove_user(
        &self,
        request: RemoveUserRequest,
    ) -> Result<CommandOutcome<CleanupReport>, Error> {
        if let Err(error) = self
            .directory
            .revoke_role(&request.user_zuid, &request.role_zuid)
            .await
        {
            warn!(
                user_zuid = %request.user_zuid,
                role_zuid = %request.role_zuid,
                kind = error.kind(),
                %error,
                "role revocation failed"
            );
            return Err(map_directory_error(error));
        }
        info!(
            user_zuid = %request.user_zuid,
            role_zuid = %request.role_zuid,
            "role revoked"
        );
        self.cache.invalidate(ReadStateKey::InstanceUsers).await;

        let Some(email) = cleanup_email(request.email.as_deref()) else {
            info!(user_zuid = %request.user_zuid, "no email supplied; skipping profile cleanup");
            return Ok(CommandOutcome::new(CleanupReport::default()));
        };
        let name = request.name.as_deref().unwrap_or_default();
        Ok(self.cleanup.run(name, &email).await)
    }
}
