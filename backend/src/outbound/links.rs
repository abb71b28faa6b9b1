//! In-process storage for email to shadow profile links.
//!
//! Links live for the lifetime of the process; profiles created before a
//! restart are found through the configured lookup instead.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ShadowProfileLinks, ShadowProfileLinksError};
use crate::domain::{EmailAddress, ShadowProfileRef};

/// Link store keyed by lower-cased email.
#[derive(Debug, Default)]
pub struct InMemoryShadowProfileLinks {
    links: RwLock<HashMap<String, Vec<ShadowProfileRef>>>,
}

impl InMemoryShadowProfileLinks {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShadowProfileLinks for InMemoryShadowProfileLinks {
    async fn record(
        &self,
        email: &EmailAddress,
        profile: &ShadowProfileRef,
    ) -> Result<(), ShadowProfileLinksError> {
        let mut links = self.links.write().await;
        let entry = links.entry(email.link_key()).or_default();
        if !entry.contains(profile) {
            entry.push(profile.clone());
        }
        Ok(())
    }

    async fn take(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ShadowProfileRef>, ShadowProfileLinksError> {
        Ok(self
            .links
            .write()
            .await
            .remove(&email.link_key())
            .unwrap_or_default())
    }
}
