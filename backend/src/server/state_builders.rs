//! Builders wiring the upstream adapters into the domain services.

use std::io;
use std::sync::Arc;

use staff_admin::domain::{
    DirectoryQueryService, InvitationLifecycleService, ReadStateCache, ShadowProfileCleanup,
    UserRemovalService,
};
use staff_admin::inbound::http::state::{HttpState, HttpStatePorts};
use staff_admin::outbound::{
    AccountsHttpDirectory, ConfiguredProfileLookup, ContentHttpStore, DatasetHttpSource,
    InMemoryShadowProfileLinks,
};
use staff_admin::settings::DirectoryConfig;
use tracing::info;

fn client_error(adapter: &str, err: &reqwest::Error) -> io::Error {
    io::Error::other(format!("failed to build {adapter} client: {err}"))
}

/// Construct the HTTP adapters and the services behind each driving port.
///
/// # Errors
/// Returns [`io::Error`] when an HTTP client cannot be built.
pub(crate) fn build_http_state(config: &DirectoryConfig) -> io::Result<HttpState> {
    let directory = Arc::new(
        AccountsHttpDirectory::new(
            config.accounts_api_url.clone(),
            config.instance_zuid.clone(),
            config.developer_token.clone(),
            config.request_timeout,
        )
        .map_err(|err| client_error("accounts", &err))?,
    );
    let content = Arc::new(
        ContentHttpStore::new(
            config.instance_api_url.clone(),
            config.content_model_zuid.clone(),
            config.developer_token.clone(),
            config.request_timeout,
        )
        .map_err(|err| client_error("content", &err))?,
    );
    let dataset = Arc::new(
        DatasetHttpSource::new(
            config.dataset_url.clone(),
            config.dataset_password.clone(),
            config.request_timeout,
        )
        .map_err(|err| client_error("dataset", &err))?,
    );
    let links = Arc::new(InMemoryShadowProfileLinks::new());
    let lookup = Arc::new(ConfiguredProfileLookup::select(
        config.profile_lookup,
        Arc::clone(&dataset),
        Arc::clone(&content),
    ));
    let cache = Arc::new(ReadStateCache::new(config.cache_max_age));

    let query = DirectoryQueryService::new(
        Arc::clone(&directory),
        Arc::clone(&dataset),
        Arc::clone(&cache),
    );
    let invitations = InvitationLifecycleService::new(
        Arc::clone(&directory),
        Arc::clone(&content),
        Arc::clone(&links),
        Arc::clone(&lookup),
        Arc::clone(&cache),
    );
    let removals = UserRemovalService::new(
        directory,
        ShadowProfileCleanup::new(content, links, lookup),
        cache,
    );

    info!(
        instance = %config.instance_zuid,
        content_model = %config.content_model_zuid,
        lookup = ?config.profile_lookup,
        "upstream adapters configured"
    );

    Ok(HttpState::new(HttpStatePorts {
        directory: Arc::new(query),
        invitations: Arc::new(invitations),
        removals: Arc::new(removals),
    }))
}
