//! Backend library modules.

pub mod demo_data;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling and debug builds.
pub use doc::ApiDoc;
/// Request tracing middleware attached to every app.
pub use middleware::Trace;
