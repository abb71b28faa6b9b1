//! Read-side service backing the [`DirectoryQuery`] driving port.
//!
//! Upstream failures are logged and reported as absence; nothing here
//! propagates an error to the caller.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::read_state::CacheSlot;
use crate::domain::ports::{DirectoryQuery, IdentityDirectory, LocationCatalogue};
use crate::domain::{InstanceUser, LocationOption, PendingInvite, ReadStateCache, Role};

/// Query service combining the directory, the locations dataset, and the
/// shared read-state cache.
#[derive(Clone)]
pub struct DirectoryQueryService<D, L> {
    directory: Arc<D>,
    locations: Arc<L>,
    cache: Arc<ReadStateCache>,
}

impl<D, L> DirectoryQueryService<D, L> {
    /// Create a query service over the given adapters and cache.
    pub fn new(directory: Arc<D>, locations: Arc<L>, cache: Arc<ReadStateCache>) -> Self {
        Self {
            directory,
            locations,
            cache,
        }
    }
}

/// Serve `slot` from cache or fetch it, caching only successful reads.
async fn cached_or_fetch<T, E, Fut>(
    slot: &CacheSlot<Vec<T>>,
    cache: &ReadStateCache,
    collection: &'static str,
    fetch: Fut,
) -> Option<Vec<T>>
where
    T: Clone,
    E: std::fmt::Display,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let (cached, generation) = slot.lookup(cache.max_age()).await;
    if cached.is_some() {
        return cached;
    }
    match fetch.await {
        Ok(values) => {
            slot.store(generation, values.clone()).await;
            Some(values)
        }
        Err(error) => {
            warn!(%error, collection, "directory read failed; reporting no data");
            None
        }
    }
}

#[async_trait]
impl<D, L> DirectoryQuery for DirectoryQueryService<D, L>
where
    D: IdentityDirectory,
    L: LocationCatalogue,
{
    async fn instance_users(&self) -> Option<Vec<InstanceUser>> {
        cached_or_fetch(
            &self.cache.users,
            &self.cache,
            "instance_users",
            self.directory.list_instance_users(),
        )
        .await
    }

    async fn instance_roles(&self) -> Option<Vec<Role>> {
        cached_or_fetch(
            &self.cache.roles,
            &self.cache,
            "instance_roles",
            self.directory.list_instance_roles(),
        )
        .await
    }

    async fn pending_invites(&self) -> Option<Vec<PendingInvite>> {
        cached_or_fetch(
            &self.cache.pending,
            &self.cache,
            "pending_invites",
            self.directory.list_pending_invites(),
        )
        .await
    }

    async fn location_options(&self) -> Vec<LocationOption> {
        cached_or_fetch(
            &self.cache.locations,
            &self.cache,
            "location_options",
            self.locations.list_location_options(),
        )
        .await
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    //! Soft-failure and caching behaviour of the query service.
    use super::*;
    use std::time::Duration;

    use crate::domain::ReadStateKey;
    use crate::domain::Zuid;
    use crate::domain::ports::{
        IdentityDirectoryError, LocationCatalogueError, MockIdentityDirectory,
        MockLocationCatalogue,
    };

    fn pending(zuid: &str) -> PendingInvite {
        PendingInvite {
            invite_zuid: Zuid::new(zuid).expect("fixture zuid"),
            name: "Jane Roe".to_owned(),
            email: "jane@x.io".to_owned(),
        }
    }

    fn service(
        directory: MockIdentityDirectory,
        locations: MockLocationCatalogue,
        max_age: Duration,
    ) -> (
        DirectoryQueryService<MockIdentityDirectory, MockLocationCatalogue>,
        Arc<ReadStateCache>,
    ) {
        let cache = Arc::new(ReadStateCache::new(max_age));
        (
            DirectoryQueryService::new(Arc::new(directory), Arc::new(locations), cache.clone()),
            cache,
        )
    }

    #[tokio::test]
    async fn unavailable_directory_reports_absent_users() {
        let mut directory = MockIdentityDirectory::new();
        directory
            .expect_list_instance_users()
            .times(1)
            .return_once(|| Err(IdentityDirectoryError::transport("connection refused")));
        let (service, _) = service(directory, MockLocationCatalogue::new(), Duration::ZERO);

        assert!(service.instance_users().await.is_none());
    }

    #[tokio::test]
    async fn unavailable_dataset_degrades_to_no_locations() {
        let mut locations = MockLocationCatalogue::new();
        locations
            .expect_list_location_options()
            .times(1)
            .return_once(|| Err(LocationCatalogueError::rejected(401_u16, "bad password")));
        let (service, _) = service(MockIdentityDirectory::new(), locations, Duration::ZERO);

        assert!(service.location_options().await.is_empty());
    }

    #[tokio::test]
    async fn cached_reads_skip_upstream_until_invalidated() {
        let mut directory = MockIdentityDirectory::new();
        directory
            .expect_list_pending_invites()
            .times(2)
            .returning(|| Ok(vec![pending("10-invite-1")]));
        let (service, cache) =
            service(directory, MockLocationCatalogue::new(), Duration::from_secs(300));

        assert_eq!(service.pending_invites().await.map(|v| v.len()), Some(1));
        assert_eq!(service.pending_invites().await.map(|v| v.len()), Some(1));
        cache.invalidate(ReadStateKey::PendingInvites).await;
        assert_eq!(service.pending_invites().await.map(|v| v.len()), Some(1));
    }

    #[tokio::test]
    async fn failed_reads_are_not_cached() {
        let mut directory = MockIdentityDirectory::new();
        let mut calls = 0;
        directory
            .expect_list_instance_roles()
            .times(2)
            .returning(move || {
                calls += 1;
                if calls == 1 {
                    Err(IdentityDirectoryError::timeout("deadline elapsed"))
                } else {
                    Ok(Vec::new())
                }
            });
        let (service, _) =
            service(directory, MockLocationCatalogue::new(), Duration::from_secs(300));

        assert!(service.instance_roles().await.is_none());
        assert_eq!(service.instance_roles().await, Some(Vec::new()));
    }
}
