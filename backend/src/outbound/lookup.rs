//! Fallback profile lookup selected by configuration.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ContentHttpStore, DatasetHttpSource};
use crate::domain::ports::{ShadowProfileLookup, ShadowProfileStoreError};
use crate::domain::{EmailAddress, ProfileLookup, ShadowProfileRef};

/// The lookup strategy chosen at startup.
pub enum ConfiguredProfileLookup {
    /// Dataset `getUsersByEmail` query.
    Email(Arc<DatasetHttpSource>),
    /// Content search on the composite `"name - email"` key.
    CompositeKey(Arc<ContentHttpStore>),
}

impl ConfiguredProfileLookup {
    /// Pick the adapter matching `strategy`.
    pub fn select(
        strategy: ProfileLookup,
        dataset: Arc<DatasetHttpSource>,
        content: Arc<ContentHttpStore>,
    ) -> Self {
        match strategy {
            ProfileLookup::Email => Self::Email(dataset),
            ProfileLookup::CompositeKey => Self::CompositeKey(content),
        }
    }
}

#[async_trait]
impl ShadowProfileLookup for ConfiguredProfileLookup {
    async fn find_profiles(
        &self,
        name: &str,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileStoreError> {
        match self {
            Self::Email(dataset) => dataset.find_profiles(name, email).await,
            Self::CompositeKey(content) => content.find_profiles(name, email).await,
        }
    }
}
