//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (records, health)
//! - **Schemas**: The card request/response bodies and the error envelope
//! - **Security**: The HTTP Basic authentication scheme
//!
//! Debug builds serve the generated specification at
//! `/api-docs/openapi.json` for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::cards::{CardPayloadBody, CardResponseBody};

/// Enrich the generated document with the Basic authentication scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cash card records API",
        description = "Ownership-scoped CRUD over cash card records with HTTP Basic authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::cards::create_card,
        crate::inbound::http::cards::get_card,
        crate::inbound::http::cards::list_cards,
        crate::inbound::http::cards::update_card,
        crate::inbound::http::cards::delete_card,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CardPayloadBody, CardResponseBody, Error, ErrorCode)),
    tags(
        (name = "records", description = "Ownership-scoped cash card records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
