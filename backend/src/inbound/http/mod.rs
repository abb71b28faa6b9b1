//! HTTP inbound adapter exposing the staff admin REST endpoints.

pub mod directory;
pub mod error;
pub mod health;
pub mod invites;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
