//! Stateful in-memory upstreams for lifecycle scenarios.
//!
//! The fakes behave like the real directory and content store closely
//! enough that reads after a mutation reflect it: invites appear and
//! disappear, revoked users drop out, and deleted profiles are gone.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use staff_admin::domain::ports::{
    IdentityDirectory, IdentityDirectoryError, InviteSubmission, LocationCatalogue,
    LocationCatalogueError, ShadowProfileLookup, ShadowProfileStore, ShadowProfileStoreError,
};
use staff_admin::domain::{
    EmailAddress, InstanceUser, InviteDraft, LocationOption, PendingInvite, PublishVersion, Role,
    ShadowProfileDraft, ShadowProfileRef, Zuid,
};

pub const STAFF_MODEL: &str = "6-staff";
pub const CONTRIBUTOR_ROLE: &str = "30-contrib";

pub fn zuid(raw: &str) -> Zuid {
    Zuid::new(raw).expect("fixture zuid")
}

struct DirectoryState {
    users: Vec<InstanceUser>,
    pending: Vec<PendingInvite>,
    invite_status: u16,
    next_invite: u32,
    submitted_locations: Vec<Option<String>>,
}

/// Accounts API stand-in for one instance.
pub struct FakeDirectory {
    state: Mutex<DirectoryState>,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self {
            state: Mutex::new(DirectoryState {
                users: Vec::new(),
                pending: Vec::new(),
                invite_status: 201,
                next_invite: 1,
                submitted_locations: Vec::new(),
            }),
        }
    }
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DirectoryState> {
        self.state.lock().expect("directory lock")
    }

    /// Add an active user holding the contributor role.
    pub fn add_user(&self, user_zuid: &str, first: &str, last: &str, email: &str) {
        self.lock().users.push(InstanceUser {
            zuid: zuid(user_zuid),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: email.to_owned(),
            role: contributor(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        });
    }

    /// Status returned for the next invite submissions.
    pub fn answer_invites_with(&self, status: u16) {
        self.lock().invite_status = status;
    }

    /// `locations` payload of every submitted invite.
    pub fn submitted_locations(&self) -> Vec<Option<String>> {
        self.lock().submitted_locations.clone()
    }
}

fn contributor() -> Role {
    Role {
        zuid: zuid(CONTRIBUTOR_ROLE),
        name: "Contributor".to_owned(),
    }
}

#[async_trait]
impl IdentityDirectory for FakeDirectory {
    async fn list_instance_users(&self) -> Result<Vec<InstanceUser>, IdentityDirectoryError> {
        Ok(self.lock().users.clone())
    }

    async fn list_instance_roles(&self) -> Result<Vec<Role>, IdentityDirectoryError> {
        Ok(vec![contributor()])
    }

    async fn list_pending_invites(&self) -> Result<Vec<PendingInvite>, IdentityDirectoryError> {
        Ok(self.lock().pending.clone())
    }

    async fn create_invite(
        &self,
        draft: &InviteDraft,
    ) -> Result<InviteSubmission, IdentityDirectoryError> {
        let mut state = self.lock();
        state
            .submitted_locations
            .push(draft.locations().to_payload());
        let invite_zuid = zuid(&format!("10-invite-{}", state.next_invite));
        state.next_invite += 1;
        state.pending.push(PendingInvite {
            invite_zuid: invite_zuid.clone(),
            name: draft.name().to_owned(),
            email: draft.email().as_str().to_owned(),
        });
        match state.invite_status {
            201 => Ok(InviteSubmission::Created {
                invite_zuid: Some(invite_zuid),
            }),
            status => Ok(InviteSubmission::Accepted { status }),
        }
    }

    async fn cancel_invite(&self, invite_zuid: &Zuid) -> Result<(), IdentityDirectoryError> {
        let mut state = self.lock();
        let before = state.pending.len();
        state
            .pending
            .retain(|invite| &invite.invite_zuid != invite_zuid);
        if state.pending.len() == before {
            return Err(IdentityDirectoryError::rejected(404_u16, "invite not found"));
        }
        Ok(())
    }

    async fn revoke_role(
        &self,
        user_zuid: &Zuid,
        role_zuid: &Zuid,
    ) -> Result<(), IdentityDirectoryError> {
        let mut state = self.lock();
        let before = state.users.len();
        state
            .users
            .retain(|user| !(&user.zuid == user_zuid && &user.role.zuid == role_zuid));
        if state.users.len() == before {
            return Err(IdentityDirectoryError::rejected(404_u16, "role grant not found"));
        }
        Ok(())
    }
}

/// Dataset stand-in serving a fixed location list.
pub struct FakeLocations;

#[async_trait]
impl LocationCatalogue for FakeLocations {
    async fn list_location_options(&self) -> Result<Vec<LocationOption>, LocationCatalogueError> {
        Ok(vec![
            LocationOption {
                value: "loc-1".to_owned(),
                label: "Downtown".to_owned(),
            },
            LocationOption {
                value: "loc-2".to_owned(),
                label: "Harbour".to_owned(),
            },
        ])
    }
}

struct StoredProfile {
    reference: ShadowProfileRef,
    email: String,
    versions: Vec<PublishVersion>,
}

struct StoreState {
    profiles: Vec<StoredProfile>,
    next_item: u32,
    available: bool,
}

/// Content store stand-in; also answers the email lookup.
pub struct FakeContentStore {
    state: Mutex<StoreState>,
}

impl Default for FakeContentStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(StoreState {
                profiles: Vec::new(),
                next_item: 1,
                available: true,
            }),
        }
    }
}

impl FakeContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock")
    }

    /// Make every call fail with a transport error.
    pub fn go_offline(&self) {
        self.lock().available = false;
    }

    /// Insert a published profile that has no recorded link.
    pub fn seed_profile(&self, email: &str) {
        let mut state = self.lock();
        let reference = next_reference(&mut state);
        state.profiles.push(StoredProfile {
            reference,
            email: email.to_owned(),
            versions: vec![publish_version("9-seeded")],
        });
    }

    /// Number of profiles stored for `email`.
    pub fn profiles_for(&self, email: &str) -> usize {
        self.lock()
            .profiles
            .iter()
            .filter(|profile| profile.email == email)
            .count()
    }

    fn check_available(&self) -> Result<(), ShadowProfileStoreError> {
        if self.lock().available {
            Ok(())
        } else {
            Err(ShadowProfileStoreError::transport("content store unreachable"))
        }
    }
}

fn next_reference(state: &mut StoreState) -> ShadowProfileRef {
    let reference = ShadowProfileRef {
        model_zuid: zuid(STAFF_MODEL),
        item_zuid: zuid(&format!("7-item-{}", state.next_item)),
    };
    state.next_item += 1;
    reference
}

fn publish_version(raw: &str) -> PublishVersion {
    PublishVersion {
        zuid: zuid(raw),
        updated_at: Utc
            .with_ymd_and_hms(2024, 2, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn not_found() -> ShadowProfileStoreError {
    ShadowProfileStoreError::rejected(404_u16, "item not found")
}

#[async_trait]
impl ShadowProfileStore for FakeContentStore {
    async fn create_profile(
        &self,
        draft: &ShadowProfileDraft,
    ) -> Result<ShadowProfileRef, ShadowProfileStoreError> {
        self.check_available()?;
        let mut state = self.lock();
        let reference = next_reference(&mut state);
        state.profiles.push(StoredProfile {
            reference: reference.clone(),
            email: draft.email.as_str().to_owned(),
            versions: vec![publish_version("9-initial")],
        });
        Ok(reference)
    }

    async fn list_publishings(
        &self,
        profile: &ShadowProfileRef,
    ) -> Result<Vec<PublishVersion>, ShadowProfileStoreError> {
        self.check_available()?;
        self.lock()
            .profiles
            .iter()
            .find(|stored| &stored.reference == profile)
            .map(|stored| stored.versions.clone())
            .ok_or_else(not_found)
    }

    async fn unpublish(
        &self,
        profile: &ShadowProfileRef,
        version: &Zuid,
    ) -> Result<(), ShadowProfileStoreError> {
        self.check_available()?;
        let mut state = self.lock();
        let stored = state
            .profiles
            .iter_mut()
            .find(|stored| &stored.reference == profile)
            .ok_or_else(not_found)?;
        stored.versions.retain(|existing| &existing.zuid != version);
        Ok(())
    }

    async fn delete_profile(&self, profile: &ShadowProfileRef) -> Result<(), ShadowProfileStoreError> {
        self.check_available()?;
        let mut state = self.lock();
        let before = state.profiles.len();
        state.profiles.retain(|stored| &stored.reference != profile);
        if state.profiles.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl ShadowProfileLookup for FakeContentStore {
    async fn find_profiles(
        &self,
        _name: &str,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileStoreError> {
        self.check_available()?;
        Ok(self
            .lock()
            .profiles
            .iter()
            .filter(|stored| stored.email == email.as_str())
            .map(|stored| stored.reference.clone())
            .collect())
    }
}
