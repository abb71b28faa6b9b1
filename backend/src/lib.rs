//! Staff admin backend.
//!
//! Lists instance users, roles, and pending invites; invites, cancels, and
//! removes users through the accounts API; and keeps each user's staff
//! shadow profile in the content store in step with their directory
//! record.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
