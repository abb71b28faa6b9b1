//! Driven ports for shadow profiles in the instance content store.
//!
//! [`ShadowProfileStore`] performs writes against known items.
//! [`ShadowProfileLookup`] finds items when no link was recorded; the two
//! production lookups (dataset query by email, content search by composite
//! key) are not equivalent, so the strategy is chosen by configuration.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{EmailAddress, PublishVersion, ShadowProfileDraft, ShadowProfileRef, Zuid};

define_port_error! {
    /// Errors surfaced by the content store and profile lookups.
    pub enum ShadowProfileStoreError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "content store transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "content store timeout: {message}",
        /// The store answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "content store rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "content store response decode failed: {message}",
    }
}

/// Port for creating, unpublishing, and deleting shadow profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShadowProfileStore: Send + Sync {
    /// Create a profile item and return its address.
    async fn create_profile(
        &self,
        draft: &ShadowProfileDraft,
    ) -> Result<ShadowProfileRef, ShadowProfileStoreError>;

    /// List publish versions of a profile item; empty when unpublished.
    async fn list_publishings(
        &self,
        profile: &ShadowProfileRef,
    ) -> Result<Vec<PublishVersion>, ShadowProfileStoreError>;

    /// Remove one publish version.
    async fn unpublish(
        &self,
        profile: &ShadowProfileRef,
        version: &Zuid,
    ) -> Result<(), ShadowProfileStoreError>;

    /// Delete the profile item.
    async fn delete_profile(&self, profile: &ShadowProfileRef) -> Result<(), ShadowProfileStoreError>;
}

/// Port locating profiles that have no recorded link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShadowProfileLookup: Send + Sync {
    /// Find every profile belonging to the invitee or user.
    async fn find_profiles(
        &self,
        name: &str,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileStoreError>;
}
