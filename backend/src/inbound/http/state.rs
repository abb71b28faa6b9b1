//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DirectoryQuery, InvitationCommand, UserRemovalCommand};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub directory: Arc<dyn DirectoryQuery>,
    pub invitations: Arc<dyn InvitationCommand>,
    pub removals: Arc<dyn UserRemovalCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn DirectoryQuery>,
    pub invitations: Arc<dyn InvitationCommand>,
    pub removals: Arc<dyn UserRemovalCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            directory,
            invitations,
            removals,
        } = ports;
        Self {
            directory,
            invitations,
            removals,
        }
    }
}
