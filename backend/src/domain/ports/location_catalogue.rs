//! Driven port for the location options dataset.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::LocationOption;

define_port_error! {
    /// Errors surfaced while fetching location options.
    pub enum LocationCatalogueError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "location dataset transport failed: {message}",
        /// The dataset host answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "location dataset rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "location dataset decode failed: {message}",
    }
}

/// Port listing the locations an invitee may be assigned to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationCatalogue: Send + Sync {
    /// Fetch every selectable location.
    async fn list_location_options(&self) -> Result<Vec<LocationOption>, LocationCatalogueError>;
}
