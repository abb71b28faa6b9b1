//! Accounts API outbound adapter.
//!
//! This module provides the HTTP implementation of the `IdentityDirectory`
//! port.

mod dto;
mod http_directory;

pub use http_directory::AccountsHttpDirectory;
