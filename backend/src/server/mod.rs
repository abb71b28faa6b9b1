//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use staff_admin::Trace;
#[cfg(debug_assertions)]
use staff_admin::doc::ApiDoc;
use staff_admin::domain::Error;
use staff_admin::inbound::http::directory::{
    list_locations, list_pending_invites, list_roles, list_users,
};
use staff_admin::inbound::http::health::{HealthState, live, ready};
use staff_admin::inbound::http::invites::{cancel_invite, submit_invite};
use staff_admin::inbound::http::state::HttpState;
use staff_admin::inbound::http::users::remove_user_role;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}")).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed query string: {err}")).into()
    })
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_users)
        .service(list_roles)
        .service(list_locations)
        .service(list_pending_invites)
        .service(submit_invite)
        .service(cancel_invite)
        .service(remove_user_role);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from validated configuration.
///
/// Readiness flips once the upstream adapters are built and the socket is
/// bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when an adapter client cannot be built or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        directory,
    } = config;
    let http_state = web::Data::new(build_http_state(&directory)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
