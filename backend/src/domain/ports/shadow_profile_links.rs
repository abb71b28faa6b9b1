//! Driven port recording which shadow profiles belong to which email.
//!
//! Links are written when a profile is created and consumed during cleanup,
//! replacing inference-by-search for every profile this service created.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{EmailAddress, ShadowProfileRef};

define_port_error! {
    /// Errors surfaced by link storage.
    pub enum ShadowProfileLinksError {
        /// Backing storage failed.
        Storage { message: String } => "profile link storage failed: {message}",
    }
}

/// Port storing email to shadow profile links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShadowProfileLinks: Send + Sync {
    /// Remember that `profile` belongs to `email`.
    async fn record(
        &self,
        email: &EmailAddress,
        profile: &ShadowProfileRef,
    ) -> Result<(), ShadowProfileLinksError>;

    /// Remove and return every profile linked to `email`.
    async fn take(&self, email: &EmailAddress)
    -> Result<Vec<ShadowProfileRef>, ShadowProfileLinksError>;
}
