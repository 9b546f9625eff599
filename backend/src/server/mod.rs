//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::inbound::http::cards::{create_card, delete_card, get_card, list_cards, update_card};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Assemble the application with every route, extractor config, and
/// middleware attached.
///
/// Shared between [`create_server`] and the integration tests so both drive
/// the same wiring.
pub fn build_app(
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
    // Malformed JSON bodies surface in the domain error shape rather than
    // the framework's default rejection.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON payload: {err}")).into()
    });

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .wrap(Trace)
        .service(create_card)
        .service(list_cards)
        .service(get_card)
        .service(update_card)
        .service(delete_card)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route(
        "/api-docs/openapi.json",
        web::get().to(|| async { web::Json(ApiDoc::openapi()) }),
    );

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when demo data seeding, binding the socket,
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        demo_data,
    } = config;

    let http_state = web::Data::new(build_http_state(&demo_data)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
