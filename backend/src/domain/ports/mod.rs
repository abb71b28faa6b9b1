//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe the upstream systems (accounts API, content store,
//! locations dataset, link storage). Driving ports describe the use-cases the
//! HTTP adapter invokes.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_query;
mod identity_directory;
mod invitation_command;
mod location_catalogue;
mod shadow_profile_links;
mod shadow_profile_store;

pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use identity_directory::{IdentityDirectory, IdentityDirectoryError, InviteSubmission};
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use invitation_command::{
    CancelInviteRequest, InvitationCommand, RemoveUserRequest, SubmitInviteRequest,
    UserRemovalCommand,
};
#[cfg(test)]
pub use invitation_command::{MockInvitationCommand, MockUserRemovalCommand};
pub use location_catalogue::{LocationCatalogue, LocationCatalogueError};
#[cfg(test)]
pub use location_catalogue::MockLocationCatalogue;
pub use shadow_profile_links::{ShadowProfileLinks, ShadowProfileLinksError};
#[cfg(test)]
pub use shadow_profile_links::MockShadowProfileLinks;
pub use shadow_profile_store::{ShadowProfileLookup, ShadowProfileStore, ShadowProfileStoreError};
#[cfg(test)]
pub use shadow_profile_store::{MockShadowProfileLookup, MockShadowProfileStore};
