//! Outbound adapters implementing domain ports for the upstream services.
//!
//! - **accounts**: the accounts API (`IdentityDirectory`)
//! - **content**: the instance content API (`ShadowProfileStore`, composite lookup)
//! - **dataset**: the dataset host (`LocationCatalogue`, email lookup)
//! - **links**: in-process `ShadowProfileLinks`
//!
//! Adapters are thin translators between domain types and wire formats.
//! They contain no business logic.

pub mod accounts;
pub mod content;
pub mod dataset;
pub(crate) mod http_support;
pub mod links;
pub mod lookup;

pub use accounts::AccountsHttpDirectory;
pub use content::ContentHttpStore;
pub use dataset::DatasetHttpSource;
pub use links::InMemoryShadowProfileLinks;
pub use lookup::ConfiguredProfileLookup;
