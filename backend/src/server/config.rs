//! HTTP server configuration object.

use std::net::SocketAddr;

use staff_admin::settings::DirectoryConfig;

/// Everything the server needs to bind and build its adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory: DirectoryConfig,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, directory: DirectoryConfig) -> Self {
        Self {
            bind_addr,
            directory,
        }
    }
}
