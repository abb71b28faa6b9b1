//! Staff admin entry-point: loads settings, wires the upstream adapters,
//! and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use staff_admin::inbound::http::health::HealthState;
use staff_admin::settings::AdminSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AdminSettings::load().map_err(|e| {
        error!(error = %e, "failed to load settings");
        std::io::Error::other(e.to_string())
    })?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let directory = settings.directory_config().map_err(|e| {
        error!(error = %e, "invalid settings");
        std::io::Error::other(e)
    })?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, directory))?;
    info!(%bind_addr, "staff admin listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
