//! Cached read-state shared by the query service and the command services.
//!
//! Reads are memoised per [`ReadStateKey`] for at most `max_age`; mutations
//! invalidate the keys they affect. Each slot carries a generation counter
//! so a fetch that started before an invalidation cannot store its now-stale
//! result afterwards.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::{InstanceUser, LocationOption, PendingInvite, Role};

/// Cached collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadStateKey {
    /// Active users with role grants.
    InstanceUsers,
    /// Instance role list.
    InstanceRoles,
    /// Outstanding invitations.
    PendingInvites,
    /// Location multi-select options.
    LocationOptions,
}

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

struct SlotState<T> {
    generation: u64,
    entry: Option<Entry<T>>,
}

/// One cached collection.
pub(crate) struct CacheSlot<T> {
    state: RwLock<SlotState<T>>,
}

impl<T: Clone> CacheSlot<T> {
    fn new() -> Self {
        Self {
            state: RwLock::new(SlotState {
                generation: 0,
                entry: None,
            }),
        }
    }

    /// Cached value when younger than `max_age`, plus the generation to
    /// pass to [`CacheSlot::store`] after a refetch.
    pub(crate) async fn lookup(&self, max_age: Duration) -> (Option<T>, u64) {
        let state = self.state.read().await;
        let fresh = state
            .entry
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < max_age)
            .map(|entry| entry.value.clone());
        (fresh, state.generation)
    }

    /// Store `value` unless the slot was invalidated since `generation`.
    pub(crate) async fn store(&self, generation: u64, value: T) {
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entry = Some(Entry {
                value,
                fetched_at: Instant::now(),
            });
        }
    }

    async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation = state.generation.wrapping_add(1);
        state.entry = None;
    }
}

/// Shared cache for the four read collections.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use staff_admin::domain::{ReadStateCache, ReadStateKey};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache = ReadStateCache::new(Duration::from_secs(30));
/// cache.invalidate(ReadStateKey::PendingInvites).await;
/// # });
/// ```
pub struct ReadStateCache {
    max_age: Duration,
    pub(crate) users: CacheSlot<Vec<InstanceUser>>,
    pub(crate) roles: CacheSlot<Vec<Role>>,
    pub(crate) pending: CacheSlot<Vec<PendingInvite>>,
    pub(crate) locations: CacheSlot<Vec<LocationOption>>,
}

impl ReadStateCache {
    /// Create an empty cache. A zero `max_age` disables memoisation.
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            users: CacheSlot::new(),
            roles: CacheSlot::new(),
            pending: CacheSlot::new(),
            locations: CacheSlot::new(),
        }
    }

    /// Maximum age of a cached collection.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Force the next read of `key` to refetch.
    pub async fn invalidate(&self, key: ReadStateKey) {
        match key {
            ReadStateKey::InstanceUsers => self.users.invalidate().await,
            ReadStateKey::InstanceRoles => self.roles.invalidate().await,
            ReadStateKey::PendingInvites => self.pending.invalidate().await,
            ReadStateKey::LocationOptions => self.locations.invalidate().await,
        }
        tracing::debug!(?key, "read-state invalidated");
    }
}

impl std::fmt::Debug for ReadStateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadStateCache")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}
