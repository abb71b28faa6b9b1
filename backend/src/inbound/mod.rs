//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The panel talks to the backend over HTTP only; handlers live under
//! [`http`].

pub mod http;
